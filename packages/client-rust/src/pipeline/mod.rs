//! Remote-call pipeline.
//!
//! Every remote call issued by a domain object goes through one tower stack:
//!
//! 1. [`TracingLayer`] -- span + event per call (outermost)
//! 2. [`TransportService`] -- hands the call to the [`Transport`](nimbus_core::Transport)
//!
//! Retries and timeouts belong to the transport.

pub mod trace;
pub mod transport;

use std::sync::Arc;

use nimbus_core::Transport;
use tower::ServiceBuilder;

pub use trace::{TracingLayer, TracingService};
pub use transport::TransportService;

/// The concrete pipeline type held by a client.
pub type CallPipeline = TracingService<TransportService>;

/// Build the call pipeline around a transport.
#[must_use]
pub fn build_call_pipeline(transport: Arc<dyn Transport>) -> CallPipeline {
    ServiceBuilder::new()
        .layer(TracingLayer)
        .service(TransportService::new(transport))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
