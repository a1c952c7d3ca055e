//! Client entry point.

use std::sync::Arc;

use nimbus_core::{decode, PreconditionError, Session, SessionToken, Tolerance, Transport};
use tracing::info;

use crate::call::Call;
use crate::config::{ClientConfig, ConfigError};
use crate::domain::accounts::{self, method, AuthenticatedUser, Profiles};
use crate::domain::metadata::AppMetadata;
use crate::gate::{require_non_empty, Capability, ClientContext, Gate};
use crate::orchestrate::{Chain, Step};
use crate::pipeline::build_call_pipeline;

const USER_NAME: &str = "UserName";
const USER_PASSWORD: &str = "UserSuppliedPassword";

/// Handle to one application's view of the service.
///
/// Cheap to clone; clones share the call pipeline.
#[derive(Debug, Clone)]
pub struct Client {
    context: Arc<ClientContext>,
}

impl Client {
    /// Validate `config` and build the call pipeline over `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the application credentials are missing.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(app = %config.app_name, root = %config.service_root, "client configured");
        let pipeline = build_call_pipeline(transport);
        Ok(Self {
            context: Arc::new(ClientContext { pipeline, config }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.context.config
    }

    /// Capability for building domain objects directly, e.g.
    /// `Friends::new(client.capability(Some(session)))`.
    #[must_use]
    pub fn capability(&self, session: Option<Session>) -> Capability {
        Capability {
            client: Arc::clone(&self.context),
            session,
        }
    }

    pub(crate) fn context(&self) -> Arc<ClientContext> {
        Arc::clone(&self.context)
    }

    /// Sign in with a user name and password, then fetch the profile.
    ///
    /// Resolves to `None` when the token returned by the service has no
    /// profile behind it.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for a blank user name or password.
    pub fn login(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<Call<Option<AuthenticatedUser>>, PreconditionError> {
        self.token_then_profile(method::RECOVER, user_name, password)
    }

    /// Register a new account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for a blank user name or password.
    pub fn create_user(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<Call<Option<AuthenticatedUser>>, PreconditionError> {
        self.token_then_profile(method::CREATE, user_name, password)
    }

    /// Resume a session from a previously issued token.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for a blank token.
    pub fn resume(
        &self,
        token: SessionToken,
    ) -> Result<Call<Option<AuthenticatedUser>>, PreconditionError> {
        require_non_empty("token", token.expose())?;
        Ok(accounts::from_token(self.context(), token))
    }

    /// Profile lookups, signed in or not.
    #[must_use]
    pub fn profiles(&self, session: Option<Session>) -> Profiles {
        Profiles::from_gate(Gate::optional(self.context(), session))
    }

    /// The application-scoped metadata store.
    #[must_use]
    pub fn app_metadata(&self) -> AppMetadata {
        AppMetadata::from_gate(Gate::anonymous(self.context()))
    }

    fn token_then_profile(
        &self,
        entry: &'static str,
        user_name: &str,
        password: &str,
    ) -> Result<Call<Option<AuthenticatedUser>>, PreconditionError> {
        require_non_empty("user_name", user_name)?;
        require_non_empty("password", password)?;

        let gate = Gate::anonymous(self.context());
        let call = gate
            .request(entry)
            .param(USER_NAME, user_name)
            .param(USER_PASSWORD, password);
        let token = gate.dispatch(call, Tolerance::Strict, decode::scalar::<String>);

        let context = self.context();
        Ok(Chain::start(token)
            .then(move |token| Step::Issue(accounts::from_token(context, SessionToken::new(token))))
            .finish())
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::{ErrorCode, RawReply, UserId};

    use super::*;
    use crate::domain::friends::Friends;
    use crate::test_support::{self, rows, ScriptedTransport};

    #[test]
    fn rejects_invalid_config() {
        let transport: Arc<dyn Transport> = ScriptedTransport::new();
        let err = Client::new(ClientConfig::new("", "pw"), transport).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(_)));
    }

    #[tokio::test]
    async fn login_recovers_token_then_profile() {
        let transport = ScriptedTransport::new();
        transport.on(method::RECOVER, RawReply::scalar("UT-fresh"));
        transport.on(
            method::GET_FROM_TOKEN,
            rows(&[&[("userID", "21"), ("userName", "ada")]]),
        );
        let client = test_support::client(&transport);

        let call = client.login("ada", "secret").unwrap();
        assert_eq!(call.entry_method(), method::RECOVER);
        let user = call.await.unwrap().unwrap();

        assert_eq!(user.user_id(), UserId(21));
        assert_eq!(user.session().token.expose(), "UT-fresh");
        let calls = transport.calls();
        assert_eq!(calls[0].get(USER_NAME), Some("ada"));
        assert_eq!(calls[0].get(USER_PASSWORD), Some("secret"));
        assert_eq!(calls[1].get("UserToken"), Some("UT-fresh"));
    }

    #[tokio::test]
    async fn bad_credentials_stop_after_first_step() {
        let transport = ScriptedTransport::new();
        transport.on(method::RECOVER, RawReply::error(ErrorCode::InvalidUserCredentials));
        let client = test_support::client(&transport);

        let env = client.login("ada", "wrong").unwrap().envelope().await;
        assert_eq!(env.error(), &ErrorCode::InvalidUserCredentials);
        assert!(env.value().is_none());
        assert_eq!(transport.methods(), vec![method::RECOVER]);
    }

    #[tokio::test]
    async fn create_user_reports_name_in_use() {
        let transport = ScriptedTransport::new();
        transport.on(method::CREATE, RawReply::error(ErrorCode::UserNameAlreadyInUse));
        let client = test_support::client(&transport);

        let err = client.create_user("ada", "pw").unwrap().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNameAlreadyInUse);
    }

    #[test]
    fn blank_credentials_are_rejected_before_dispatch() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);

        assert_eq!(
            client.login("", "pw").unwrap_err(),
            PreconditionError::Empty { name: "user_name" }
        );
        assert_eq!(
            client.resume(SessionToken::new("")).unwrap_err(),
            PreconditionError::Empty { name: "token" }
        );
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn session_objects_without_session_make_no_calls() {
        let transport = ScriptedTransport::new();
        let client = test_support::client(&transport);

        assert_eq!(
            Friends::new(client.capability(None)).unwrap_err(),
            PreconditionError::MissingSession
        );
        assert!(transport.calls().is_empty());
    }
}
