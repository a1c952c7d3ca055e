//! Client configuration.

use std::fmt;

/// Environment variable holding the application name.
pub const ENV_APP_NAME: &str = "NIMBUS_APP_NAME";
/// Environment variable holding the application password.
pub const ENV_APP_PASSWORD: &str = "NIMBUS_APP_PASSWORD";
/// Environment variable overriding the service root URL.
pub const ENV_SERVICE_ROOT: &str = "NIMBUS_SERVICE_ROOT";

/// Application-level settings shared by every domain object of a client.
///
/// The application credentials are attached to every remote call. The
/// service root is not interpreted by the SDK; it is handed to transport
/// implementations that need to know where to connect.
#[derive(Clone)]
pub struct ClientConfig {
    /// Registered application name.
    pub app_name: String,
    /// Application password issued with the name.
    pub app_password: String,
    /// Base URL of the remote service.
    pub service_root: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            app_password: String::new(),
            service_root: "https://api.nimbus.dev/service/v1/".to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_name", &self.app_name)
            .field("app_password", &"<redacted>")
            .field("service_root", &self.service_root)
            .finish()
    }
}

/// Errors from loading or validating a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl ClientConfig {
    /// Configuration with the given application credentials and the default
    /// service root.
    #[must_use]
    pub fn new(app_name: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_password: app_password.into(),
            ..Self::default()
        }
    }

    /// Load from `NIMBUS_APP_NAME`, `NIMBUS_APP_PASSWORD` and the optional
    /// `NIMBUS_SERVICE_ROOT`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let app_name = lookup(ENV_APP_NAME).ok_or(ConfigError::MissingVar(ENV_APP_NAME))?;
        let app_password =
            lookup(ENV_APP_PASSWORD).ok_or(ConfigError::MissingVar(ENV_APP_PASSWORD))?;
        let mut config = Self::new(app_name, app_password);
        if let Some(root) = lookup(ENV_SERVICE_ROOT) {
            config.service_root = root;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the application credentials and the service root are
    /// non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::Empty("app_name"));
        }
        if self.app_password.trim().is_empty() {
            return Err(ConfigError::Empty("app_password"));
        }
        if self.service_root.trim().is_empty() {
            return Err(ConfigError::Empty("service_root"));
        }
        Ok(())
    }
}
