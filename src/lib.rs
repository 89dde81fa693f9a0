pub mod config;
pub mod error;
pub mod http;
pub mod items;
pub mod logger;
pub mod utils;

// Re-export commonly used types
pub use error::{ReqItemsError, Result};
pub use items::{ItemError, KeyValueArg, RequestItems, RequestMode};
