//! The transport seam: what the SDK sends and what it gets back.
//!
//! The SDK never sees HTTP, SOAP or any serialization. A [`Transport`] takes a
//! method name with string parameters and answers with a payload plus a raw
//! error code.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error_code::ErrorCode;

/// One flat, string-keyed record as returned by the service.
pub type Record = BTreeMap<String, String>;

/// A remote procedure invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    /// Remote procedure name, e.g. `"Friends_Friends_Remove"`.
    pub method: &'static str,
    /// Named string parameters. `BTreeMap` keeps the order deterministic.
    pub params: BTreeMap<&'static str, String>,
}

impl RemoteCall {
    /// A call with no parameters yet.
    #[must_use]
    pub fn new(method: &'static str) -> Self {
        Self {
            method,
            params: BTreeMap::new(),
        }
    }

    /// Add (or replace) a parameter.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(name, value.into());
        self
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Payload half of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawPayload {
    /// Nothing was returned.
    #[default]
    Empty,
    /// A single scalar, e.g. `"1"` or a newly created id.
    Scalar(String),
    /// Zero or more records.
    Records(Vec<Record>),
}

impl RawPayload {
    /// Short shape name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Scalar(_) => "scalar",
            Self::Records(_) => "records",
        }
    }
}

/// A reply as handed over by the transport, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub payload: RawPayload,
    pub code: ErrorCode,
}

impl RawReply {
    /// Build from the raw value/code pair the service returns.
    #[must_use]
    pub fn new(payload: RawPayload, raw_code: &str) -> Self {
        Self {
            payload,
            code: ErrorCode::from_raw(raw_code),
        }
    }

    /// A successful scalar reply.
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            payload: RawPayload::Scalar(value.into()),
            code: ErrorCode::None,
        }
    }

    /// A successful record-set reply.
    #[must_use]
    pub fn records(records: Vec<Record>) -> Self {
        Self {
            payload: RawPayload::Records(records),
            code: ErrorCode::None,
        }
    }

    /// A reply carrying only an error code.
    #[must_use]
    pub fn error(code: ErrorCode) -> Self {
        Self {
            payload: RawPayload::Empty,
            code,
        }
    }
}

/// The remote service client. One call per remote procedure.
///
/// Implementations own framing, serialization, retries and timeouts. An `Err`
/// means the transport itself failed (no reply at all); service-level errors
/// are reported through [`RawReply::code`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one remote call.
    async fn invoke(&self, call: &RemoteCall) -> anyhow::Result<RawReply>;
}
