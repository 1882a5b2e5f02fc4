//! Structured error handling for API responses

pub mod codes;
pub mod param;
pub mod response;
pub mod wrap;

pub use codes::ErrorCode;
pub use param::ParamError;
pub use response::StructuredError;
pub use wrap::Failure;
