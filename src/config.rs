use actix_web::cookie::Key;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_POLL_SECONDS: u64 = 30;
const MIN_POLL_SECONDS: u64 = 5;
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "Missing required environment variable {var}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load `.env` into the process environment, if one is found.
/// Must run before the logger starts so `RUST_LOG` from the file applies.
/// Variables already set in the environment win.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn load_env_file_from(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub stats_poll_seconds: u64,
    pub admin_password: String,
    pub seed_demo: bool,
    pub app_name: String,
}

impl AppConfig {
    /// Read configuration from the process environment. Call [`load_env_file`] first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let stats_poll_seconds = match lookup("STATS_POLL_SECONDS") {
            None => DEFAULT_POLL_SECONDS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs >= MIN_POLL_SECONDS => secs,
                Ok(secs) => {
                    log::warn!("STATS_POLL_SECONDS={secs} below minimum, using {MIN_POLL_SECONDS}");
                    MIN_POLL_SECONDS
                }
                Err(_) => {
                    log::warn!("Invalid STATS_POLL_SECONDS '{raw}', using {DEFAULT_POLL_SECONDS}");
                    DEFAULT_POLL_SECONDS
                }
            },
        };

        let seed_demo = lookup("SEED_DEMO")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            bind_addr,
            session_key: lookup("SESSION_KEY").filter(|v| !v.is_empty()),
            stats_poll_seconds,
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            seed_demo,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Ticketdesk".to_string()),
        })
    }

    /// Session encryption key. A missing or short `SESSION_KEY` yields a random key.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {}+), generating random key",
                    val.len(),
                    MIN_SESSION_KEY_LEN
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
