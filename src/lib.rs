// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod store;

pub use errors::{ErrorCode, Failure, ParamError, StructuredError};
