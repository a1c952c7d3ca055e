//! Direct messages between users.

use nimbus_core::{decode, Message, PreconditionError, Tolerance, UserId};

use crate::call::Call;
use crate::gate::{require_non_empty, AuthRequirement, Capability, Gate};

pub mod method {
    pub const SEND: &str = "Messages_Message_Send";
    pub const RECEIVED: &str = "Messages_Messages_Get";
    pub const SENT: &str = "Messages_SentMessages_Get";
}

#[derive(Debug, Clone)]
pub struct Messages {
    gate: Gate,
}

impl Messages {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    /// Send `text` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for blank text.
    pub fn send(&self, to: UserId, text: &str, app_tag: &str) -> Result<Call<bool>, PreconditionError> {
        require_non_empty("text", text)?;
        let call = self
            .gate
            .user_request(method::SEND)
            .param("ToUserID", to.to_string())
            .param("MessageContents", text)
            .param("ApplicationTag", app_tag);
        Ok(self
            .gate
            .dispatch(call, Tolerance::NegativeOneIsBenign, decode::flag))
    }

    /// Messages received after `after` (a service timestamp); `None` for all.
    pub fn received(&self, after: Option<&str>) -> Call<Vec<Message>> {
        self.list(method::RECEIVED, after)
    }

    /// Messages sent after `after`; `None` for all.
    pub fn sent(&self, after: Option<&str>) -> Call<Vec<Message>> {
        self.list(method::SENT, after)
    }

    fn list(&self, method: &'static str, after: Option<&str>) -> Call<Vec<Message>> {
        let mut call = self.gate.user_request(method);
        if let Some(after) = after {
            call = call.param("AfterDate", after);
        }
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<Message>)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::{ErrorCode, RawPayload, RawReply};

    use super::*;
    use crate::test_support::{self, rows, ScriptedTransport};

    fn messages(transport: &std::sync::Arc<ScriptedTransport>) -> Messages {
        let client = test_support::client(transport);
        Messages::new(client.capability(Some(test_support::session()))).unwrap()
    }

    #[tokio::test]
    async fn send_carries_recipient_and_text() {
        let transport = ScriptedTransport::new();
        transport.on(method::SEND, RawReply::scalar("1"));

        let sent = messages(&transport)
            .send(UserId(9), "hi there", "chat")
            .unwrap()
            .await
            .unwrap();
        assert!(sent);
        let call = &transport.calls()[0];
        assert_eq!(call.get("ToUserID"), Some("9"));
        assert_eq!(call.get("MessageContents"), Some("hi there"));
    }

    #[tokio::test]
    async fn send_treats_negative_one_as_success() {
        let transport = ScriptedTransport::new();
        transport.on(
            method::SEND,
            RawReply::new(RawPayload::Scalar("1".to_string()), "-1"),
        );

        let sent = messages(&transport)
            .send(UserId(9), "again", "chat")
            .unwrap()
            .await;
        assert_eq!(sent, Ok(true));
    }

    #[test]
    fn blank_text_is_rejected_before_dispatch() {
        let transport = ScriptedTransport::new();
        let err = messages(&transport).send(UserId(9), " ", "").unwrap_err();
        assert_eq!(err, PreconditionError::Empty { name: "text" });
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn received_filters_by_date_when_given() {
        let transport = ScriptedTransport::new();
        transport.on(
            method::RECEIVED,
            rows(&[&[
                ("messageID", "1"),
                ("fromUserID", "9"),
                ("toUserID", "7"),
                ("messageString", "yo"),
            ]]),
        );
        transport.on(method::SENT, RawReply::error(ErrorCode::InvalidUserToken));
        let messages = messages(&transport);

        let inbox = messages.received(Some("2024-01-01")).await.unwrap();
        assert_eq!(inbox[0].text, "yo");
        assert_eq!(transport.calls()[0].get("AfterDate"), Some("2024-01-01"));

        let env = messages.sent(None).envelope().await;
        assert_eq!(env.error(), &ErrorCode::InvalidUserToken);
        assert!(env.value().is_empty());
        assert_eq!(transport.calls()[1].get("AfterDate"), None);
    }
}
