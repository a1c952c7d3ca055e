//! The value-or-error result of one remote call.

use crate::error::ServiceError;
use crate::error_code::ErrorCode;

/// Outcome of a completed remote call (or of a whole orchestrated operation).
///
/// When `error` is [`ErrorCode::None`] the value is whatever the call
/// produced. Otherwise the value is `T::default()`: `false`, `None`, or an
/// empty collection, never uninitialized. Envelopes are immutable; the only
/// way to change one is to consume it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    value: T,
    error: ErrorCode,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `value`.
    #[must_use]
    pub fn success(value: T) -> Self {
        Self {
            value,
            error: ErrorCode::None,
        }
    }

    /// Whether the call succeeded (benign no-ops included).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The carried value. Equal to `T::default()` on failure.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The error code. [`ErrorCode::None`] on success.
    #[must_use]
    pub fn error(&self) -> &ErrorCode {
        &self.error
    }

    /// Split into value and code. This is what the callback surface delivers.
    #[must_use]
    pub fn into_parts(self) -> (T, ErrorCode) {
        (self.value, self.error)
    }

    /// Convert into the future-surface result.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] carrying the code when the envelope is a failure.
    pub fn into_result(self) -> Result<T, ServiceError> {
        if self.error.is_none() {
            Ok(self.value)
        } else {
            Err(ServiceError { code: self.error })
        }
    }

    /// Transform the value of a successful envelope. Failures keep their code
    /// and get `U::default()`.
    #[must_use]
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        if self.error.is_none() {
            Envelope::success(f(self.value))
        } else {
            Envelope::failure(self.error)
        }
    }
}

impl<T: Default> Envelope<T> {
    /// A failed envelope with the type's empty value.
    #[must_use]
    pub fn failure(code: ErrorCode) -> Self {
        debug_assert!(!code.is_none(), "failure envelope requires a failure code");
        Self {
            value: T::default(),
            error: code,
        }
    }
}
