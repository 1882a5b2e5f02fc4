use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Machine-readable error categories shared by every API response.
///
/// Codes compare by their wire string, so `Custom("NotFound")` equals
/// `NotFound`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// Unclassified failure
    Unknown,

    /// Missing or invalid credentials
    Unauthorized,

    /// Requested resource does not exist
    NotFound,

    /// Server-side fault
    ServerInternalError,

    /// One or more request parameters failed validation
    InvalidParams,

    /// Unexpected exception raised while serving the request
    InternalException,

    /// Resource with the same identity already exists
    AlreadyExists,

    /// Caller-chosen code for bad requests outside the fixed vocabulary.
    /// The empty custom code means "no code".
    Custom(String),
}

impl ErrorCode {
    /// Wire representation of this code
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "UnknownError",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "NotFound",
            Self::ServerInternalError => "ServerInternalError",
            Self::InvalidParams => "InvalidParams",
            Self::InternalException => "InternalException",
            Self::AlreadyExists => "AlreadyExists",
            Self::Custom(code) => code.as_str(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unknown => 500,
            Self::ServerInternalError => 500,
            Self::InternalException => 500,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InvalidParams => 400,
            Self::AlreadyExists => 400,
            Self::Custom(_) => 400,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// True for both spellings of the unknown category
    pub fn is_unknown(&self) -> bool {
        matches!(self.as_str(), "UnknownError" | "Unknown")
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ErrorCode {}

impl Hash for ErrorCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::Custom(String::new())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "UnknownError" => Self::Unknown,
            "Unauthorized" => Self::Unauthorized,
            "NotFound" => Self::NotFound,
            "ServerInternalError" => Self::ServerInternalError,
            "InvalidParams" => Self::InvalidParams,
            "InternalException" => Self::InternalException,
            "AlreadyExists" => Self::AlreadyExists,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match Self::from(code.as_str()) {
            Self::Custom(_) => Self::Custom(code),
            known => known,
        }
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Custom(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_codes() {
        assert_eq!(ErrorCode::InvalidParams.status_code(), 400);
        assert_eq!(ErrorCode::AlreadyExists.status_code(), 400);
        assert_eq!(ErrorCode::Custom("QuotaExceeded".into()).status_code(), 400);
        assert_eq!(ErrorCode::Unauthorized.status_code(), 401);
        assert_eq!(ErrorCode::NotFound.status_code(), 404);
        assert_eq!(ErrorCode::Unknown.status_code(), 500);
        assert_eq!(ErrorCode::ServerInternalError.status_code(), 500);
        assert_eq!(ErrorCode::InternalException.status_code(), 500);
    }

    #[test]
    fn test_short_unknown_spelling_is_kept_verbatim() {
        assert_eq!(ErrorCode::from("UnknownError"), ErrorCode::Unknown);
        assert_eq!(ErrorCode::Unknown.as_str(), "UnknownError");

        let short = ErrorCode::from("Unknown");
        assert_eq!(short.as_str(), "Unknown");
        assert_ne!(short, ErrorCode::Unknown);
        assert!(short.is_unknown());
        assert!(ErrorCode::Unknown.is_unknown());
    }

    #[test]
    fn test_equality_follows_wire_string() {
        use std::collections::HashSet;

        assert_eq!(ErrorCode::Custom("NotFound".into()), ErrorCode::NotFound);
        assert_ne!(ErrorCode::Custom("Gone".into()), ErrorCode::NotFound);

        let set: HashSet<ErrorCode> =
            [ErrorCode::NotFound, ErrorCode::Custom("NotFound".into())].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_custom_codes_pass_through() {
        let code = ErrorCode::from("CapacityExceeded".to_string());
        assert_eq!(code, ErrorCode::Custom("CapacityExceeded".into()));
        assert_eq!(code.to_string(), "CapacityExceeded");
        assert!(!code.is_empty());
        assert!(ErrorCode::default().is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "\"NotFound\"");

        let parsed: ErrorCode = serde_json::from_str("\"AlreadyExists\"").unwrap();
        assert_eq!(parsed, ErrorCode::AlreadyExists);

        let custom: ErrorCode = serde_json::from_str("\"Teapot\"").unwrap();
        assert_eq!(custom, ErrorCode::Custom("Teapot".into()));
    }
}
