//! Callback-with-state surface for call sites written against the older API.
//!
//! The callback receives the envelope's value together with a
//! [`CallbackParams`] carrying the error code and the caller's state. The
//! returned [`CallHandle`] only names the entry call; it cannot cancel or
//! track anything. For orchestrated operations the later steps are not
//! observable through it at all.

use nimbus_core::ErrorCode;

use crate::call::Call;

/// Second argument of every legacy callback.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackParams<S> {
    /// [`ErrorCode::None`] on success (benign codes included).
    pub error: ErrorCode,
    /// Whatever the caller passed to [`Call::with_callback`].
    pub state: S,
}

impl<S> CallbackParams<S> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Placeholder handle returned by the callback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallHandle {
    entry: &'static str,
}

impl CallHandle {
    /// The first remote procedure of the operation.
    #[must_use]
    pub fn entry_method(&self) -> &'static str {
        self.entry
    }

    /// Always `false`: the callback surface offers no cancellation.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        false
    }
}

impl<T: Default + Send + 'static> Call<T> {
    /// Run the call in the background and deliver `(value, params)` to
    /// `callback` when it completes. Returns immediately.
    ///
    /// On failure `value` is the type's empty value and `params.error` carries
    /// the code. Outside a tokio runtime nothing is issued and the callback
    /// runs at once with [`ErrorCode::InternetConnectionError`].
    pub fn with_callback<S, F>(self, state: S, callback: F) -> CallHandle
    where
        S: Send + 'static,
        F: FnOnce(T, CallbackParams<S>) + Send + 'static,
    {
        let (entry, future) = self.into_parts();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let (value, error) = future.await.into_parts();
                    callback(value, CallbackParams { error, state });
                });
            }
            Err(err) => {
                tracing::warn!(entry, error = %err, "no tokio runtime for callback call");
                let error = ErrorCode::InternetConnectionError;
                callback(T::default(), CallbackParams { error, state });
            }
        }
        CallHandle { entry }
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::Envelope;
    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn callback_receives_value_and_state() {
        let (tx, rx) = oneshot::channel();
        let call = Call::new("Test_Ok", async { Envelope::success(true) });

        let handle = call.with_callback("ctx", move |value, params| {
            let _ = tx.send((value, params));
        });

        assert_eq!(handle.entry_method(), "Test_Ok");
        assert!(!handle.can_cancel());
        let (value, params) = rx.await.unwrap();
        assert!(value);
        assert!(params.is_success());
        assert_eq!(params.state, "ctx");
    }

    #[tokio::test]
    async fn callback_receives_empty_value_on_failure() {
        let (tx, rx) = oneshot::channel();
        let call: Call<Vec<u32>> = Call::new("Test_Err", async {
            Envelope::failure(ErrorCode::BadParameter)
        });

        call.with_callback(11_u8, move |value, params| {
            let _ = tx.send((value, params));
        });

        let (value, params) = rx.await.unwrap();
        assert!(value.is_empty());
        assert_eq!(params.error, ErrorCode::BadParameter);
        assert_eq!(params.state, 11);
    }

    #[test]
    fn callback_without_runtime_reports_connection_error() {
        let (tx, rx) = std::sync::mpsc::channel();
        let call = Call::new("Test_NoRuntime", async { Envelope::success(true) });

        let handle = call.with_callback("ctx", move |value, params| {
            let _ = tx.send((value, params));
        });

        assert_eq!(handle.entry_method(), "Test_NoRuntime");
        let (value, params) = rx.try_recv().unwrap();
        assert!(!value);
        assert_eq!(params.error, ErrorCode::InternetConnectionError);
        assert_eq!(params.state, "ctx");
    }
}
