use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jwt_core::Algorithm;
use serde::Deserialize;

/// Authentication configuration.
///
/// Set once at startup and shared read-only across request handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Key material for signing and verifying tokens.
    pub secret: String,

    /// Signing algorithm. Non-HMAC algorithms additionally need an
    /// explicit key pair, see [`crate::JwtAuth::with_codec`].
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,

    /// Token lifetime in seconds.
    #[serde(default = "default_lifetime")]
    pub lifetime_seconds: i64,

    /// Clock-skew leeway in seconds applied to expiry checks.
    #[serde(default)]
    pub leeway_seconds: i64,

    /// Authorization scheme expected in the `Authorization` header.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Realm advertised in the `WWW-Authenticate` challenge.
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Path the login endpoint is mounted at.
    #[serde(default = "default_auth_path")]
    pub auth_path: String,
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

fn default_lifetime() -> i64 {
    300
}

fn default_scheme() -> String {
    "Bearer".to_string()
}

fn default_realm() -> String {
    "Login Required".to_string()
}

fn default_auth_path() -> String {
    "/auth".to_string()
}

impl AuthConfig {
    /// Configuration with defaults for everything but the secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
            lifetime_seconds: default_lifetime(),
            leeway_seconds: 0,
            scheme: default_scheme(),
            realm: default_realm(),
            auth_path: default_auth_path(),
        }
    }

    pub fn with_lifetime(mut self, seconds: i64) -> Self {
        self.lifetime_seconds = seconds;
        self
    }

    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn with_auth_path(mut self, path: impl Into<String>) -> Self {
        self.auth_path = path.into();
        self
    }

    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT_SECRET, JWT_LIFETIME_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if the secret is missing, a value cannot be parsed,
    /// or a duration is out of range
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("JWT"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.validate()
    }

    /// Reject durations a deployment could only have set by mistake. A
    /// non-positive lifetime would issue already-expired tokens.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.lifetime_seconds <= 0 {
            return Err(ConfigError::Message(
                "lifetime_seconds must be positive".to_string(),
            ));
        }

        if self.leeway_seconds < 0 {
            return Err(ConfigError::Message(
                "leeway_seconds must not be negative".to_string(),
            ));
        }

        Ok(self)
    }
}
