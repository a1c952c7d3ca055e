//! Error classification: raw replies into [`Envelope`]s.
//!
//! This is the single place where success and failure are decided. Both
//! public surfaces (future and callback) read the resulting envelope and never
//! re-derive the outcome themselves.

use crate::envelope::Envelope;
use crate::error::DecodeError;
use crate::error_code::ErrorCode;
use crate::transport::{RawPayload, RawReply};

/// How an operation treats [`ErrorCode::ServiceErrorNegativeOne`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tolerance {
    /// Every non-success code is a failure.
    #[default]
    Strict,
    /// The negative-one code means "already in the desired state" and is
    /// folded into success. Used by idempotent removals, sends, deletes and
    /// tag updates.
    NegativeOneIsBenign,
}

/// Kind of outcome a code maps to under a given [`Tolerance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Success,
    BenignNoOp,
    ServiceFailure,
}

impl ErrorClass {
    /// Classify a code.
    #[must_use]
    pub fn of(code: &ErrorCode, tolerance: Tolerance) -> Self {
        match (code, tolerance) {
            (ErrorCode::None, _) => Self::Success,
            (ErrorCode::ServiceErrorNegativeOne, Tolerance::NegativeOneIsBenign) => {
                Self::BenignNoOp
            }
            _ => Self::ServiceFailure,
        }
    }
}

/// Turn a raw reply into an envelope.
///
/// Pure apart from logging: the same reply, tolerance and decoder always give
/// the same envelope. `decode` runs on success and benign payloads only. A
/// payload that fails to decode becomes a failure with
/// [`ErrorCode::UnknownServiceError`].
pub fn classify<T, F>(method: &str, reply: RawReply, tolerance: Tolerance, decode: F) -> Envelope<T>
where
    T: Default,
    F: FnOnce(RawPayload) -> Result<T, DecodeError>,
{
    let RawReply { payload, code } = reply;
    match ErrorClass::of(&code, tolerance) {
        ErrorClass::Success => decode_or_fail(method, payload, decode),
        ErrorClass::BenignNoOp => {
            tracing::debug!(method, code = %code, "benign service code folded into success");
            decode_or_fail(method, payload, decode)
        }
        ErrorClass::ServiceFailure => Envelope::failure(code),
    }
}

/// Like [`classify`], but also accepts a transport-level failure, which
/// becomes [`ErrorCode::InternetConnectionError`].
pub fn classify_outcome<T, F>(
    method: &str,
    outcome: anyhow::Result<RawReply>,
    tolerance: Tolerance,
    decode: F,
) -> Envelope<T>
where
    T: Default,
    F: FnOnce(RawPayload) -> Result<T, DecodeError>,
{
    match outcome {
        Ok(reply) => classify(method, reply, tolerance, decode),
        Err(err) => {
            tracing::warn!(method, error = %err, "transport failed");
            Envelope::failure(ErrorCode::InternetConnectionError)
        }
    }
}

fn decode_or_fail<T, F>(method: &str, payload: RawPayload, decode: F) -> Envelope<T>
where
    T: Default,
    F: FnOnce(RawPayload) -> Result<T, DecodeError>,
{
    match decode(payload) {
        Ok(value) => Envelope::success(value),
        Err(err) => {
            tracing::warn!(method, error = %err, "undecodable success payload");
            Envelope::failure(ErrorCode::UnknownServiceError)
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::decode;

    fn hard_failure_code() -> impl Strategy<Value = ErrorCode> {
        prop_oneof![
            Just(ErrorCode::InternetConnectionError),
            Just(ErrorCode::UnknownServiceError),
            Just(ErrorCode::BadParameter),
            Just(ErrorCode::InvalidUserToken),
            Just(ErrorCode::UserNotFound),
            "[A-Z][A-Za-z]{3,20}".prop_map(|raw| ErrorCode::from_raw(&raw)),
        ]
        .prop_filter("not a success or benign code", |code| {
            !matches!(code, ErrorCode::None | ErrorCode::ServiceErrorNegativeOne)
        })
    }

    fn tolerance() -> impl Strategy<Value = Tolerance> {
        prop_oneof![Just(Tolerance::Strict), Just(Tolerance::NegativeOneIsBenign)]
    }

    proptest! {
        #[test]
        fn success_code_carries_decoded_value(raw in "[0-9]{1,12}", tol in tolerance()) {
            let reply = RawReply::scalar(raw.clone());
            let env = classify("Test", reply, tol, decode::scalar::<u64>);
            prop_assert!(env.is_success());
            prop_assert_eq!(*env.value(), raw.parse::<u64>().unwrap());
        }

        #[test]
        fn benign_code_never_fails_when_tolerated(payload in prop_oneof![Just("1"), Just("0"), Just("")]) {
            let reply = RawReply::new(RawPayload::Scalar(payload.to_string()), "ServiceErrorNegativeOne");
            let env = classify("Test", reply, Tolerance::NegativeOneIsBenign, decode::flag);
            prop_assert!(env.is_success());
            prop_assert_eq!(*env.value(), payload == "1");
        }

        #[test]
        fn hard_failures_carry_default(code in hard_failure_code(), tol in tolerance()) {
            let reply = RawReply {
                payload: RawPayload::Scalar("1".into()),
                code: code.clone(),
            };
            let env = classify("Test", reply, tol, decode::flag);
            prop_assert!(!env.is_success());
            prop_assert!(!*env.value());
            prop_assert_eq!(env.error(), &code);
        }

        #[test]
        fn classification_is_idempotent(code in hard_failure_code(), tol in tolerance()) {
            let reply = RawReply::error(code);
            let first = classify("Test", reply.clone(), tol, decode::records::<decode_fixture::Row>);
            let second = classify("Test", reply, tol, decode::records::<decode_fixture::Row>);
            prop_assert_eq!(first, second);
        }
    }

    mod decode_fixture {
        #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
        pub struct Row {
            pub id: String,
        }
    }

    #[test]
    fn negative_one_is_a_failure_when_strict() {
        let reply = RawReply::new(RawPayload::Scalar("1".into()), "-1");
        let env = classify("Test", reply, Tolerance::Strict, decode::flag);
        assert!(!env.is_success());
        assert_eq!(env.error(), &ErrorCode::ServiceErrorNegativeOne);
        assert!(!env.value());
    }

    #[test]
    fn undecodable_success_becomes_unknown_service_error() {
        let reply = RawReply::scalar("not-a-number");
        let env = classify("Test", reply, Tolerance::Strict, decode::scalar::<u64>);
        assert_eq!(env.error(), &ErrorCode::UnknownServiceError);
        assert_eq!(*env.value(), 0);
    }

    #[test]
    fn transport_error_becomes_connection_error() {
        let env: Envelope<Vec<decode_fixture::Row>> = classify_outcome(
            "Test",
            Err(anyhow::anyhow!("connection reset")),
            Tolerance::NegativeOneIsBenign,
            decode::records,
        );
        assert_eq!(env.error(), &ErrorCode::InternetConnectionError);
        assert!(env.value().is_empty());
    }

    #[test]
    fn error_class_table() {
        use ErrorClass::{BenignNoOp, ServiceFailure, Success};
        let negative_one = ErrorCode::ServiceErrorNegativeOne;
        assert_eq!(ErrorClass::of(&ErrorCode::None, Tolerance::Strict), Success);
        assert_eq!(ErrorClass::of(&negative_one, Tolerance::Strict), ServiceFailure);
        assert_eq!(ErrorClass::of(&negative_one, Tolerance::NegativeOneIsBenign), BenignNoOp);
        assert_eq!(
            ErrorClass::of(&ErrorCode::BadParameter, Tolerance::NegativeOneIsBenign),
            ServiceFailure
        );
    }
}
