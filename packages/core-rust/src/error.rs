//! Error types shared by every domain object.

use crate::error_code::ErrorCode;

/// A hard failure reported by the service, delivered through the future surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service call failed: {code}")]
pub struct ServiceError {
    pub code: ErrorCode,
}

/// A call that cannot be issued. Raised synchronously, before any future
/// exists and before the transport is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionError {
    #[error("an authenticated session is required")]
    MissingSession,
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("exactly one owner (user or application) must be set")]
    AmbiguousOwner,
}

/// A success payload that does not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("expected {expected} payload, got {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot parse {value:?} as {target}")]
    Parse { value: String, target: &'static str },
    #[error("malformed record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Umbrella error for callers that want a single `?` target.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SdkError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SdkError {
    /// The service code, if this is a service failure.
    #[must_use]
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Service(err) => Some(&err.code),
            Self::Precondition(_) => None,
        }
    }
}
