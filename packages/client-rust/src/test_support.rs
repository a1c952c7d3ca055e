//! Test doubles shared by the unit tests of this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use nimbus_core::{ErrorCode, RawReply, Record, RemoteCall, Session, SessionToken, Transport, UserId};
use parking_lot::Mutex;

use crate::client::Client;
use crate::config::ClientConfig;

enum Scripted {
    Reply(RawReply),
    TransportFailure(String),
}

/// Spy transport: records every issued call and replays replies queued per
/// method. A method with nothing queued answers `Other("Unscripted")`.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<RemoteCall>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for the next call of `method`.
    pub(crate) fn on(&self, method: &'static str, reply: RawReply) {
        self.replies
            .lock()
            .entry(method)
            .or_default()
            .push_back(Scripted::Reply(reply));
    }

    /// Queue a transport-level failure for the next call of `method`.
    pub(crate) fn fail(&self, method: &'static str, message: &str) {
        self.replies
            .lock()
            .entry(method)
            .or_default()
            .push_back(Scripted::TransportFailure(message.to_string()));
    }

    /// Every call issued so far, in order.
    pub(crate) fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().clone()
    }

    /// Method names of every call issued so far, in order.
    pub(crate) fn methods(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|call| call.method).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn invoke(&self, call: &RemoteCall) -> anyhow::Result<RawReply> {
        self.calls.lock().push(call.clone());
        let next = self
            .replies
            .lock()
            .get_mut(call.method)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::TransportFailure(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(RawReply::error(ErrorCode::Other("Unscripted".to_string()))),
        }
    }
}

/// A client wired to the given spy.
pub(crate) fn client(transport: &Arc<ScriptedTransport>) -> Client {
    let shared: Arc<dyn Transport> = transport.clone();
    Client::new(ClientConfig::new("test-app", "test-password"), shared)
        .expect("test config is valid")
}

/// A fixed signed-in session.
pub(crate) fn session() -> Session {
    Session::new(SessionToken::new("UT-test-token"), UserId(7))
}

/// Build one flat record.
pub(crate) fn record(fields: &[(&str, &str)]) -> Record {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Build a record-set reply.
pub(crate) fn rows(records: &[&[(&str, &str)]]) -> RawReply {
    RawReply::records(records.iter().map(|fields| record(fields)).collect())
}
