pub mod auth;
pub mod extraction_client;
pub mod sat_validator;

pub use auth::{AuthIdentity, AuthProvider, TokenAuthProvider};
pub use extraction_client::{ExtractionClient, HttpExtractionClient};
pub use sat_validator::{SatValidator, SimulatedSatValidator};
