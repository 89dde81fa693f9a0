pub mod formatter;

pub use formatter::{RequestFormat, RequestFormatter};
