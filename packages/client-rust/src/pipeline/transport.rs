//! Innermost pipeline service: hands each call to the [`Transport`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use nimbus_core::{RawReply, RemoteCall, Transport};
use tower::Service;

/// Adapts a shared [`Transport`] into a `tower::Service<RemoteCall>`.
///
/// Cloning is cheap; every clone talks to the same transport.
#[derive(Clone)]
pub struct TransportService {
    transport: Arc<dyn Transport>,
}

impl TransportService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl fmt::Debug for TransportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportService").finish_non_exhaustive()
    }
}

impl Service<RemoteCall> for TransportService {
    type Response = RawReply;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = anyhow::Result<RawReply>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, call: RemoteCall) -> Self::Future {
        let transport = Arc::clone(&self.transport);
        Box::pin(async move { transport.invoke(&call).await })
    }
}
