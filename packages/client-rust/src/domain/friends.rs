//! Friend list and friend requests of the signed-in user.

use nimbus_core::{decode, Friend, PreconditionError, Tolerance, UserId};

use crate::call::Call;
use crate::gate::{AuthRequirement, Capability, Gate};

pub mod method {
    pub const GET_LIST: &str = "Friends_Friends_GetList";
    pub const REMOVE: &str = "Friends_Friends_Remove";
    pub const REQUEST_ADD: &str = "Friends_FriendRequest_Add";
    pub const REQUEST_ACCEPT: &str = "Friends_FriendRequest_Accept";
    pub const REQUEST_DENY: &str = "Friends_FriendRequest_Deny";
    pub const REQUEST_GET: &str = "Friends_FriendRequest_Get";
}

const FRIEND_USER_ID: &str = "FriendUserID";
const APPLICATION_TAG: &str = "ApplicationTag";

#[derive(Debug, Clone)]
pub struct Friends {
    gate: Gate,
}

impl Friends {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    /// Accepted friends.
    pub fn get_all(&self) -> Call<Vec<Friend>> {
        let call = self.gate.user_request(method::GET_LIST);
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<Friend>)
    }

    /// Requests other users sent to the signed-in user.
    pub fn pending_requests(&self) -> Call<Vec<Friend>> {
        let call = self.gate.user_request(method::REQUEST_GET);
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<Friend>)
    }

    pub fn request(&self, user_id: UserId, app_tag: &str) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::REQUEST_ADD)
            .param(FRIEND_USER_ID, user_id.to_string())
            .param(APPLICATION_TAG, app_tag);
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    pub fn accept(&self, user_id: UserId, app_tag: &str) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::REQUEST_ACCEPT)
            .param(FRIEND_USER_ID, user_id.to_string())
            .param(APPLICATION_TAG, app_tag);
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    pub fn deny(&self, user_id: UserId) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::REQUEST_DENY)
            .param(FRIEND_USER_ID, user_id.to_string());
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    /// Remove a friend. Removing someone who is not a friend is a no-op
    /// success.
    pub fn remove(&self, user_id: UserId) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::REMOVE)
            .param(FRIEND_USER_ID, user_id.to_string());
        self.gate
            .dispatch(call, Tolerance::NegativeOneIsBenign, decode::flag)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::{ErrorCode, RawPayload, RawReply};

    use super::*;
    use crate::test_support::{self, rows, ScriptedTransport};

    fn friends(transport: &std::sync::Arc<ScriptedTransport>) -> Friends {
        let client = test_support::client(transport);
        Friends::new(client.capability(Some(test_support::session()))).unwrap()
    }

    fn benign() -> RawReply {
        RawReply::new(RawPayload::Scalar("1".to_string()), "ServiceErrorNegativeOne")
    }

    #[tokio::test]
    async fn remove_with_benign_code_succeeds_on_future_surface() {
        let transport = ScriptedTransport::new();
        transport.on(method::REMOVE, benign());

        assert!(friends(&transport).remove(UserId(12)).await.unwrap());
        let call = &transport.calls()[0];
        assert_eq!(call.get(FRIEND_USER_ID), Some("12"));
        assert_eq!(call.get("UserToken"), Some("UT-test-token"));
    }

    #[cfg(feature = "legacy-callbacks")]
    #[tokio::test]
    async fn remove_with_benign_code_succeeds_on_callback_surface() {
        let transport = ScriptedTransport::new();
        transport.on(method::REMOVE, benign());
        let (tx, rx) = tokio::sync::oneshot::channel();

        let handle = friends(&transport)
            .remove(UserId(12))
            .with_callback((), move |removed, params| {
                let _ = tx.send((removed, params.error));
            });

        assert_eq!(handle.entry_method(), method::REMOVE);
        let (removed, error) = rx.await.unwrap();
        assert!(removed);
        assert_eq!(error, ErrorCode::None);
    }

    #[tokio::test]
    async fn request_is_strict_about_negative_one() {
        let transport = ScriptedTransport::new();
        transport.on(method::REQUEST_ADD, benign());

        let err = friends(&transport)
            .request(UserId(3), "game")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceErrorNegativeOne);
    }

    #[tokio::test]
    async fn lists_decode_friend_records() {
        let transport = ScriptedTransport::new();
        transport.on(
            method::GET_LIST,
            rows(&[
                &[("friendID", "3"), ("friendName", "bo")],
                &[("friendID", "4"), ("friendName", "cy")],
            ]),
        );
        transport.on(method::REQUEST_GET, RawReply::records(vec![]));
        let friends = friends(&transport);

        let all = friends.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].user_id, UserId(4));
        assert!(friends.pending_requests().await.unwrap().is_empty());
    }

    #[test]
    fn requires_session() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);
        assert_eq!(
            Friends::new(client.capability(None)).unwrap_err(),
            PreconditionError::MissingSession
        );
        assert!(transport.calls().is_empty());
    }
}
