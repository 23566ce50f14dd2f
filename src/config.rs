//! # Configuration Module
//!
//! Startup configuration read from the environment (and an optional `.env`
//! file). Values are fixed for the lifetime of the process.

use std::time::Duration;

use reqwest::Url;
use teloxide::types::UserId;

use crate::errors::ConfigError;

pub const DEFAULT_DATABASE_PATH: &str = "storefront.db";
pub const DEFAULT_MANAGER_URL: &str = "https://t.me/Fresko2";
pub const DEFAULT_REVIEWS_URL: &str = "https://t.me/mskstoreopt";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Output format for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot access token
    pub bot_token: String,
    /// The only user allowed to change the catalog
    pub admin_user_id: UserId,
    /// SQLite database file
    pub database_path: String,
    /// External link to a direct chat with the store manager
    pub manager_url: Url,
    /// Public group with customer reviews
    pub reviews_url: Url,
    /// Idle time after which a conversation session is dropped
    pub session_ttl: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let admin_raw = get("ADMIN_USER_ID").ok_or(ConfigError::Missing("ADMIN_USER_ID"))?;
        let admin_user_id = admin_raw
            .trim()
            .parse::<u64>()
            .map(UserId)
            .map_err(|e| ConfigError::Invalid {
                key: "ADMIN_USER_ID",
                reason: e.to_string(),
            })?;

        let database_path = get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let manager_url = parse_url(
            "MANAGER_URL",
            &get("MANAGER_URL").unwrap_or_else(|| DEFAULT_MANAGER_URL.to_string()),
        )?;
        let reviews_url = parse_url(
            "REVIEWS_URL",
            &get("REVIEWS_URL").unwrap_or_else(|| DEFAULT_REVIEWS_URL.to_string()),
        )?;

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "SESSION_TTL_SECS",
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_TTL_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    reason: format!("expected 'text' or 'json', got '{other}'"),
                })
            }
        };

        Ok(Self {
            bot_token,
            admin_user_id,
            database_path,
            manager_url,
            reviews_url,
            session_ttl,
            log_format,
        })
    }

    /// Whether `user_id` is the configured administrator
    pub fn is_admin(&self, user_id: UserId) -> bool {
        user_id == self.admin_user_id
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
