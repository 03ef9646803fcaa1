//! Capa de infraestructura
//!
//! Dueña de los recursos externos (disco local, almacenamiento de objetos).
//! Solo expone capacidades; no conoce RFCs ni sesiones.

pub mod kv_store;
pub mod object_storage;

pub use kv_store::{load_json, save_json, JsonFileStore, KeyValueStore, MemoryStore};
pub use object_storage::{LocalObjectStorage, MemoryObject, MemoryObjectStorage, ObjectStorage, StoredObject};
