pub mod request;
pub mod types;

// Re-export commonly used types for convenient access
pub use request::{PreparedRequest, RequestBody};
pub use types::{Method, parse_url};
