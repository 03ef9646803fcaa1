pub mod logging;

pub use logging::{format_size, truncate_text};
