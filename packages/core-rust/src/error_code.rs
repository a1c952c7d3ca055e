//! Error codes reported by the remote service.
//!
//! The transport hands codes over as raw strings. [`ErrorCode::from_raw`]
//! parses them into this enumeration; codes the SDK does not know by name are
//! preserved verbatim in [`ErrorCode::Other`] and always count as hard failures.

use std::fmt;

/// A service error code, as carried by every [`crate::Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The call succeeded.
    None,
    /// "Nothing to do": the target was already in the requested state.
    /// Non-fatal for idempotent removals and sends.
    ServiceErrorNegativeOne,
    /// The transport could not reach the service.
    InternetConnectionError,
    /// The service failed without a specific code, or replied with a payload
    /// the SDK could not decode.
    UnknownServiceError,
    /// A parameter was rejected by the service.
    BadParameter,
    /// The application name or password was rejected.
    InvalidApplicationCredentials,
    /// The session token is unknown or expired.
    InvalidUserToken,
    /// Username or password did not match an account.
    InvalidUserCredentials,
    /// Account creation failed because the name is taken.
    UserNameAlreadyInUse,
    /// The referenced user does not exist.
    UserNotFound,
    /// The referenced album does not exist or belongs to someone else.
    AlbumDoesNotExist,
    /// The referenced picture does not exist.
    PhotoDoesNotExist,
    /// The referenced store item does not exist.
    StoreItemDoesNotExist,
    /// Any code not known by name.
    Other(String),
}

impl ErrorCode {
    /// Parse a raw code string as produced by the transport.
    ///
    /// Empty strings and `"None"` denote success. `"-1"` is accepted as an
    /// alias for [`ErrorCode::ServiceErrorNegativeOne`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" | "None" => Self::None,
            "-1" | "ServiceErrorNegativeOne" => Self::ServiceErrorNegativeOne,
            "InternetConnectionError" => Self::InternetConnectionError,
            "UnknownServiceError" => Self::UnknownServiceError,
            "BadParameter" => Self::BadParameter,
            "InvalidApplicationCredentials" => Self::InvalidApplicationCredentials,
            "InvalidUserToken" => Self::InvalidUserToken,
            "InvalidUserCredentials" => Self::InvalidUserCredentials,
            "UserNameAlreadyInUse" => Self::UserNameAlreadyInUse,
            "UserNotFound" => Self::UserNotFound,
            "AlbumDoesNotExist" => Self::AlbumDoesNotExist,
            "PhotoDoesNotExist" => Self::PhotoDoesNotExist,
            "StoreItemDoesNotExist" => Self::StoreItemDoesNotExist,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical name of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::ServiceErrorNegativeOne => "ServiceErrorNegativeOne",
            Self::InternetConnectionError => "InternetConnectionError",
            Self::UnknownServiceError => "UnknownServiceError",
            Self::BadParameter => "BadParameter",
            Self::InvalidApplicationCredentials => "InvalidApplicationCredentials",
            Self::InvalidUserToken => "InvalidUserToken",
            Self::InvalidUserCredentials => "InvalidUserCredentials",
            Self::UserNameAlreadyInUse => "UserNameAlreadyInUse",
            Self::UserNotFound => "UserNotFound",
            Self::AlbumDoesNotExist => "AlbumDoesNotExist",
            Self::PhotoDoesNotExist => "PhotoDoesNotExist",
            Self::StoreItemDoesNotExist => "StoreItemDoesNotExist",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is the success sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_none_are_success() {
        assert_eq!(ErrorCode::from_raw(""), ErrorCode::None);
        assert_eq!(ErrorCode::from_raw("None"), ErrorCode::None);
        assert!(ErrorCode::from_raw("  ").is_none());
    }

    #[test]
    fn negative_one_has_two_spellings() {
        assert_eq!(ErrorCode::from_raw("-1"), ErrorCode::ServiceErrorNegativeOne);
        assert_eq!(
            ErrorCode::from_raw("ServiceErrorNegativeOne"),
            ErrorCode::ServiceErrorNegativeOne
        );
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let code = ErrorCode::from_raw("QuotaExceeded");
        assert_eq!(code, ErrorCode::Other("QuotaExceeded".to_string()));
        assert_eq!(code.to_string(), "QuotaExceeded");
    }

    #[test]
    fn named_codes_round_trip_through_display() {
        for code in [
            ErrorCode::InvalidUserToken,
            ErrorCode::UserNameAlreadyInUse,
            ErrorCode::AlbumDoesNotExist,
            ErrorCode::InternetConnectionError,
        ] {
            assert_eq!(ErrorCode::from_raw(code.as_str()), code);
        }
    }
}
