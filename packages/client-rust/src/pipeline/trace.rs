//! Tracing middleware for remote calls.
//!
//! Records call duration and outcome on a `tracing` span and emits one event
//! per completed call.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use nimbus_core::{RawReply, RemoteCall};
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

// ---------------------------------------------------------------------------
// TracingLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments remote calls with timing and outcome.
#[derive(Debug, Clone)]
pub struct TracingLayer;

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

// ---------------------------------------------------------------------------
// TracingService
// ---------------------------------------------------------------------------

/// Service wrapper that records duration and outcome of each remote call.
#[derive(Debug, Clone)]
pub struct TracingService<S> {
    inner: S,
}

/// Outcome label for a finished call. Service codes are reported as-is; the
/// classifier decides later whether they are benign.
fn outcome_label(result: &anyhow::Result<RawReply>) -> &'static str {
    match result {
        Ok(reply) if reply.code.is_none() => "ok",
        Ok(_) => "service_error",
        Err(_) => "transport_error",
    }
}

impl<S> Service<RemoteCall> for TracingService<S>
where
    S: Service<RemoteCall, Response = RawReply, Error = anyhow::Error> + Send,
    S::Future: Send + 'static,
{
    type Response = RawReply;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = anyhow::Result<RawReply>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, call: RemoteCall) -> Self::Future {
        let method = call.method;

        let span = info_span!(
            "remote_call",
            method = method,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(call);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = start.elapsed().as_millis() as u64;
                let outcome = outcome_label(&result);

                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::Span::current().record("outcome", outcome);

                match &result {
                    Ok(reply) => tracing::info!(
                        method,
                        duration_ms,
                        outcome,
                        code = %reply.code,
                        "remote call complete"
                    ),
                    Err(err) => tracing::info!(
                        method,
                        duration_ms,
                        outcome,
                        error = %err,
                        "remote call complete"
                    ),
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
