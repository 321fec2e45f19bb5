//! Process-wide auth configuration.
//!
//! The signing secret and token TTL are loaded once at startup. A missing or
//! empty secret is a hard error: there is no insecure fallback default, and
//! the process must refuse to serve.

use chrono::Duration;
use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const SECRET_VAR: &str = "JWT_SECRET";

/// Environment variable holding the token TTL (e.g. `90s`, `15m`, `12h`, `7d`).
pub const TTL_VAR: &str = "JWT_EXPIRES_IN";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("invalid duration '{0}': {1}")]
    InvalidTtl(String, String),
}

/// Validated startup configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub signing_secret: String,
    pub token_ttl: Duration,
}

// Manual Debug: the secret must never end up in logs via `{:?}`.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl AuthConfig {
    /// Build a configuration from explicit values (tests, embedders).
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> Result<Self, ConfigError> {
        let signing_secret = secret.into();
        if signing_secret.is_empty() {
            return Err(ConfigError::Empty(SECRET_VAR));
        }
        Ok(Self {
            signing_secret,
            token_ttl,
        })
    }

    /// Load configuration from the environment.
    ///
    /// Both variables are required; `main` treats any error here as fatal
    /// before binding a listener.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var(SECRET_VAR).map_err(|_| ConfigError::Missing(SECRET_VAR))?;
        let ttl_raw = std::env::var(TTL_VAR).map_err(|_| ConfigError::Missing(TTL_VAR))?;
        if ttl_raw.is_empty() {
            return Err(ConfigError::Empty(TTL_VAR));
        }
        Self::new(secret, parse_ttl(&ttl_raw)?)
    }
}

/// Parse a duration string like `90s`, `15m`, `12h`, `7d`.
pub fn parse_ttl(s: &str) -> Result<Duration, ConfigError> {
    let invalid = |why: &str| ConfigError::InvalidTtl(s.to_string(), why.to_string());

    let (num_str, unit) = s.split_at(s.len().saturating_sub(1));
    let num: i64 = num_str
        .parse()
        .map_err(|_| invalid("expected <number><unit>"))?;
    if num <= 0 {
        return Err(invalid("duration must be positive"));
    }

    match unit {
        "s" => Ok(Duration::seconds(num)),
        "m" => Ok(Duration::minutes(num)),
        "h" => Ok(Duration::hours(num)),
        "d" => Ok(Duration::days(num)),
        "w" => Ok(Duration::weeks(num)),
        _ => Err(invalid("unit must be one of s/m/h/d/w")),
    }
}
