//! Capabilities and the authentication gate.
//!
//! Domain objects do not inherit from a shared base. Each one holds a
//! [`Gate`]: the client capability (pipeline + config), the optional session,
//! and the declared [`AuthRequirement`]. Session-requiring objects cannot be
//! built without a session, so the check happens once at construction and
//! never per call.

use std::fmt;
use std::sync::Arc;

use nimbus_core::{
    classify_outcome, DecodeError, PreconditionError, RawPayload, RemoteCall, Session,
    SessionToken, Tolerance, UserId,
};
use tower::ServiceExt;

use crate::call::Call;
use crate::config::ClientConfig;
use crate::pipeline::CallPipeline;

/// Wire names of the parameters every call may carry.
pub mod params {
    pub const APPLICATION_NAME: &str = "ApplicationName";
    pub const APPLICATION_PASSWORD: &str = "ApplicationPassword";
    pub const USER_TOKEN: &str = "UserToken";
    pub const USER_ID: &str = "UserID";
}

/// Shared state of one client: the call pipeline and the configuration.
pub(crate) struct ClientContext {
    pub(crate) pipeline: CallPipeline,
    pub(crate) config: ClientConfig,
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// What a domain object may do: talk to the service, optionally as a user.
#[derive(Debug, Clone)]
pub struct Capability {
    pub(crate) client: Arc<ClientContext>,
    pub(crate) session: Option<Session>,
}

impl Capability {
    /// The session carried by this capability, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

/// Whether a domain object needs a signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// Construction fails without a session.
    Session,
    /// Usable with or without a session.
    Optional,
}

/// How a call identifies the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Token(SessionToken),
    User(UserId),
}

impl Credential {
    fn apply(self, call: RemoteCall) -> RemoteCall {
        match self {
            Self::Token(token) => call.param(params::USER_TOKEN, token.expose()),
            Self::User(user_id) => call.param(params::USER_ID, user_id.to_string()),
        }
    }
}

/// A capability that has passed its construction-time auth check.
#[derive(Debug, Clone)]
pub struct Gate {
    capability: Capability,
    requirement: AuthRequirement,
}

impl Gate {
    /// Check `capability` against `requirement`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] when a session is
    /// required and the capability has none.
    pub fn new(capability: Capability, requirement: AuthRequirement) -> Result<Self, PreconditionError> {
        if requirement == AuthRequirement::Session && capability.session.is_none() {
            return Err(PreconditionError::MissingSession);
        }
        Ok(Self {
            capability,
            requirement,
        })
    }

    /// A session-requiring gate built from a session the caller already holds.
    pub(crate) fn signed_in(client: Arc<ClientContext>, session: Session) -> Self {
        Self {
            capability: Capability {
                client,
                session: Some(session),
            },
            requirement: AuthRequirement::Session,
        }
    }

    /// An optional-auth gate, signed in or not.
    pub(crate) fn optional(client: Arc<ClientContext>, session: Option<Session>) -> Self {
        Self {
            capability: Capability { client, session },
            requirement: AuthRequirement::Optional,
        }
    }

    /// A gate with no session, for application-scoped calls.
    pub(crate) fn anonymous(client: Arc<ClientContext>) -> Self {
        Self::optional(client, None)
    }

    #[must_use]
    pub fn requirement(&self) -> AuthRequirement {
        self.requirement
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.capability.session.as_ref()
    }

    #[must_use]
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Pick the credential for a call: the session token when signed in,
    /// otherwise the bare `fallback` user id.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] when neither is available.
    pub fn credential(&self, fallback: Option<UserId>) -> Result<Credential, PreconditionError> {
        match (&self.capability.session, fallback) {
            (Some(session), _) => Ok(Credential::Token(session.token.clone())),
            (None, Some(user_id)) => Ok(Credential::User(user_id)),
            (None, None) => Err(PreconditionError::MissingSession),
        }
    }

    /// Start a call carrying the application credentials.
    pub(crate) fn request(&self, method: &'static str) -> RemoteCall {
        let config = &self.capability.client.config;
        RemoteCall::new(method)
            .param(params::APPLICATION_NAME, config.app_name.as_str())
            .param(params::APPLICATION_PASSWORD, config.app_password.as_str())
    }

    /// Start a call carrying application credentials and the session token.
    /// Only meaningful on session-requiring gates, where the token is always
    /// present.
    pub(crate) fn user_request(&self, method: &'static str) -> RemoteCall {
        let call = self.request(method);
        match &self.capability.session {
            Some(session) => call.param(params::USER_TOKEN, session.token.expose()),
            None => call,
        }
    }

    /// Start a call identified by [`Gate::credential`].
    ///
    /// # Errors
    ///
    /// Same as [`Gate::credential`].
    pub(crate) fn identified_request(
        &self,
        method: &'static str,
        fallback: Option<UserId>,
    ) -> Result<RemoteCall, PreconditionError> {
        let credential = self.credential(fallback)?;
        Ok(credential.apply(self.request(method)))
    }

    /// Issue `call` through the pipeline and classify its reply.
    pub(crate) fn dispatch<T, F>(&self, call: RemoteCall, tolerance: Tolerance, decode: F) -> Call<T>
    where
        T: Default + Send + 'static,
        F: FnOnce(RawPayload) -> Result<T, DecodeError> + Send + 'static,
    {
        let pipeline = self.capability.client.pipeline.clone();
        let method = call.method;
        Call::new(method, async move {
            let outcome = pipeline.oneshot(call).await;
            classify_outcome(method, outcome, tolerance, decode)
        })
    }
}

/// Reject empty (or whitespace-only) required arguments.
pub(crate) fn require_non_empty(name: &'static str, value: &str) -> Result<(), PreconditionError> {
    if value.trim().is_empty() {
        Err(PreconditionError::Empty { name })
    } else {
        Ok(())
    }
}

/// Reject zero counts and distances.
pub(crate) fn require_positive(name: &'static str, value: u32) -> Result<(), PreconditionError> {
    if value == 0 {
        Err(PreconditionError::Zero { name })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::{decode, RawReply};

    use super::*;
    use crate::test_support::{self, ScriptedTransport};

    #[test]
    fn session_requirement_fails_at_construction() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);

        let err = Gate::new(client.capability(None), AuthRequirement::Session).unwrap_err();
        assert_eq!(err, PreconditionError::MissingSession);
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn optional_requirement_accepts_no_session() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);

        let gate = Gate::new(client.capability(None), AuthRequirement::Optional).unwrap();
        assert!(gate.session().is_none());
        assert_eq!(gate.requirement(), AuthRequirement::Optional);
    }

    #[test]
    fn credential_prefers_session_token() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);
        let session = test_support::session();

        let signed_in =
            Gate::new(client.capability(Some(session.clone())), AuthRequirement::Optional).unwrap();
        assert_eq!(
            signed_in.credential(Some(UserId(99))).unwrap(),
            Credential::Token(session.token)
        );

        let anonymous = Gate::new(client.capability(None), AuthRequirement::Optional).unwrap();
        assert_eq!(
            anonymous.credential(Some(UserId(99))).unwrap(),
            Credential::User(UserId(99))
        );
        assert_eq!(
            anonymous.credential(None).unwrap_err(),
            PreconditionError::MissingSession
        );
    }

    #[test]
    fn requests_carry_application_credentials() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);
        let gate = Gate::signed_in(client.context(), test_support::session());

        let call = gate.user_request("Test_Method");
        assert_eq!(call.get(params::APPLICATION_NAME), Some("test-app"));
        assert_eq!(call.get(params::APPLICATION_PASSWORD), Some("test-password"));
        assert_eq!(call.get(params::USER_TOKEN), Some("UT-test-token"));

        let call = Gate::anonymous(client.context())
            .identified_request("Test_Method", Some(UserId(3)))
            .unwrap();
        assert_eq!(call.get(params::USER_ID), Some("3"));
        assert_eq!(call.get(params::USER_TOKEN), None);
    }

    #[tokio::test]
    async fn dispatch_classifies_reply() {
        let transport = ScriptedTransport::new();
        transport.on("Test_Count", RawReply::scalar("12"));
        let client = test_support::client(&transport);
        let gate = Gate::anonymous(client.context());

        let count = gate
            .dispatch(gate.request("Test_Count"), Tolerance::Strict, decode::scalar::<u32>)
            .await
            .unwrap();
        assert_eq!(count, 12);
    }

    #[tokio::test]
    async fn dispatch_maps_transport_failure() {
        let transport = ScriptedTransport::new();
        transport.fail("Test_Down", "connection refused");
        let client = test_support::client(&transport);
        let gate = Gate::anonymous(client.context());

        let env = gate
            .dispatch(gate.request("Test_Down"), Tolerance::NegativeOneIsBenign, decode::flag)
            .envelope()
            .await;
        assert_eq!(env.error(), &nimbus_core::ErrorCode::InternetConnectionError);
        assert!(!env.value());
    }

    #[test]
    fn argument_checks() {
        assert_eq!(
            require_non_empty("name", "  "),
            Err(PreconditionError::Empty { name: "name" })
        );
        assert!(require_non_empty("name", "a").is_ok());
        assert_eq!(
            require_positive("limit", 0),
            Err(PreconditionError::Zero { name: "limit" })
        );
    }
}
