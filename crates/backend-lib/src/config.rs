// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_LOG_N;
use crate::error::AppError;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "signup.toml";

/// Prefix for environment overrides, e.g. `SIGNUP_LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "SIGNUP_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Max-age of the `auth_token` cookie and TTL of the backing session
    pub auth_token_expiry_secs: u64,
    /// Upper bound on each call to the user directory or auth provider
    pub upstream_timeout_secs: u64,
    /// scrypt cost parameter (`log2(N)`)
    pub password_hash_log_n: u8,
    /// Interval between expired-session sweeps
    pub session_cleanup_secs: u64,
    /// Account created at start-up, if configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_user: Option<SeedUser>,
}

/// Credentials for the start-up account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            auth_token_expiry_secs: 60 * 60 * 24 * 7, // 7 days
            upstream_timeout_secs: 10,
            password_hash_log_n: DEFAULT_LOG_N,
            session_cleanup_secs: 60 * 60,
            seed_user: None,
        }
    }
}

impl Settings {
    /// Load from `signup.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given TOML file and the environment.
    ///
    /// Later sources win: defaults, then the file, then `SIGNUP_*` variables.
    /// A missing file is not an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "log_level must be one of {LOG_LEVELS:?}, got {:?}",
                self.log_level
            )));
        }
        if self.auth_token_expiry_secs == 0 {
            return Err(AppError::Config("auth_token_expiry_secs must be positive".to_string()));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(AppError::Config("upstream_timeout_secs must be positive".to_string()));
        }
        if self.session_cleanup_secs == 0 {
            return Err(AppError::Config("session_cleanup_secs must be positive".to_string()));
        }
        if !(1..=20).contains(&self.password_hash_log_n) {
            return Err(AppError::Config(
                "password_hash_log_n must be between 1 and 20".to_string(),
            ));
        }
        if let Some(seed) = &self.seed_user {
            if seed.username.is_empty() || seed.password.is_empty() {
                return Err(AppError::Config(
                    "seed_user needs a username and a password".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn auth_token_max_age(&self) -> Duration {
        Duration::from_secs(self.auth_token_expiry_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_secs)
    }
}

/// Load settings from the default sources
pub fn load_settings() -> Result<Settings> {
    Settings::load()
}
