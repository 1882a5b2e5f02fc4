use std::error::Error as StdError;
use std::fmt;

use super::response::StructuredError;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Any failure value a handler may want to report
#[derive(Debug)]
pub enum Failure {
    /// No value at all; wrapping it is a programming error
    Absent,
    /// Already structured, passed through untouched
    Structured(StructuredError),
    /// A failure exposing a textual description
    Described(BoxError),
    /// Anything else, reduced to its string form
    Other(String),
}

impl Failure {
    pub fn described<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from(Box::new(err) as BoxError)
    }

    pub fn other(value: impl fmt::Display) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<StructuredError> for Failure {
    fn from(err: StructuredError) -> Self {
        Self::Structured(err)
    }
}

impl From<BoxError> for Failure {
    fn from(err: BoxError) -> Self {
        match err.downcast::<StructuredError>() {
            Ok(structured) => Self::Structured(*structured),
            Err(err) => Self::Described(err),
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StructuredError>() {
            Ok(structured) => Self::Structured(structured),
            Err(err) => Self::Described(err.into()),
        }
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Self::described(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::described(err)
    }
}

impl From<String> for Failure {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<&str> for Failure {
    fn from(value: &str) -> Self {
        Self::Other(value.to_string())
    }
}

impl<T: Into<Failure>> From<Option<T>> for Failure {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl StructuredError {
    /// Normalize any failure into a `StructuredError`.
    ///
    /// Structured errors come back unchanged; everything else becomes a 500
    /// `UnknownError` carrying the failure's description as its message.
    ///
    /// # Panics
    ///
    /// Panics when given [`Failure::Absent`].
    pub fn wrap(value: impl Into<Failure>) -> Self {
        match value.into() {
            Failure::Absent => panic!("cannot wrap an absent failure value"),
            Failure::Structured(err) => err,
            Failure::Described(err) => Self::unknown(err.to_string()),
            Failure::Other(text) => Self::unknown(text),
        }
    }
}

impl From<anyhow::Error> for StructuredError {
    fn from(err: anyhow::Error) -> Self {
        Self::wrap(err)
    }
}
