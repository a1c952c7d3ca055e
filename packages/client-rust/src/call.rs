//! Dual-surface adapter.
//!
//! Every public operation is implemented once and returns a [`Call`]: a lazy
//! future of an [`Envelope`]. Nothing reaches the transport until the call is
//! awaited or handed to a callback. The call can then be consumed through
//! either surface:
//!
//! - **future surface**: `call.await` yields `Result<T, ServiceError>`,
//! - **callback surface** (feature `legacy-callbacks`): `call.with_callback(..)`
//!   see [`crate::legacy`].
//!
//! Both surfaces read the same envelope, so they always agree on success.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

use nimbus_core::{Envelope, ServiceError};

/// A boxed, sendable future of an envelope.
pub type EnvelopeFuture<T> = Pin<Box<dyn Future<Output = Envelope<T>> + Send>>;

/// A pending remote operation.
///
/// `entry_method` is the first remote procedure the operation issues. For
/// orchestrated operations that is the only step a caller can observe; later
/// steps are internal.
#[must_use = "calls are lazy: await them or attach a callback"]
pub struct Call<T> {
    entry: &'static str,
    future: EnvelopeFuture<T>,
}

impl<T> Call<T> {
    /// Wrap an envelope-producing future.
    pub fn new<F>(entry: &'static str, future: F) -> Self
    where
        F: Future<Output = Envelope<T>> + Send + 'static,
    {
        Self {
            entry,
            future: Box::pin(future),
        }
    }

    pub(crate) fn from_boxed(entry: &'static str, future: EnvelopeFuture<T>) -> Self {
        Self { entry, future }
    }

    /// Name of the remote procedure this call starts with.
    #[must_use]
    pub fn entry_method(&self) -> &'static str {
        self.entry
    }

    /// Resolve to the raw envelope instead of a `Result`.
    pub async fn envelope(self) -> Envelope<T> {
        self.future.await
    }

    pub(crate) fn into_parts(self) -> (&'static str, EnvelopeFuture<T>) {
        (self.entry, self.future)
    }
}

impl<T: Send + 'static> Call<T> {
    /// Transform the successful value. Failures pass through with `U::default()`.
    pub fn map<U, F>(self, f: F) -> Call<U>
    where
        U: Default + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let Self { entry, future } = self;
        Call::new(entry, async move { future.await.map(f) })
    }
}

impl<T: Send + 'static> IntoFuture for Call<T> {
    type Output = Result<T, ServiceError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        let future = self.future;
        Box::pin(async move { future.await.into_result() })
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}
