//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup. Missing secrets are fatal; tunables
//! fall back to defaults. Fallbacks are recorded on the config and logged
//! once the subscriber is up.

use std::env;
use std::fmt;

use thiserror::Error;
use tracing::warn;

/// Default Slack Web API base URL.
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("ticket and order webhooks cannot share the path {0}")]
    DuplicatePath(String),

    #[error("webhook path {0} is reserved or not a literal route")]
    InvalidPath(String),
}

/// An optional variable that was set but unusable, so its default applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFallback {
    pub env_var: &'static str,
    pub value: String,
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Slack bot token used for chat.postMessage
    pub slack_bot_token: String,

    /// Channel that receives rendered messages
    pub slack_channel_id: String,

    /// Route for ticket webhooks, always starting with `/`
    pub ticket_webhook_path: String,

    /// Route for order webhooks, always starting with `/`
    pub order_webhook_path: String,

    /// Shared secret for `X-Hub-Signature` verification
    pub signature_secret: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Slack Web API base URL (overridable for tests and proxies)
    pub slack_api_base_url: String,

    /// Timeout for one outbound notification, in milliseconds
    pub notify_timeout_ms: u64,

    /// Directory for the rolling JSON log file
    pub log_dir: Option<String>,

    /// Malformed optional variables replaced by defaults
    pub fallbacks: Vec<ConfigFallback>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Values are kept verbatim; blank counts as missing
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let required_trimmed =
            |name: &'static str| required(name).map(|v| v.trim().to_string());

        let ticket_webhook_path = normalize_path(&required_trimmed("SECRET_URL_PATH")?);
        let order_webhook_path = normalize_path(&required_trimmed("SECRET_ORDER_URL_PATH")?);
        if ticket_webhook_path == order_webhook_path {
            return Err(ConfigError::DuplicatePath(ticket_webhook_path));
        }
        for path in [&ticket_webhook_path, &order_webhook_path] {
            if !is_routable(path) {
                return Err(ConfigError::InvalidPath(path.clone()));
            }
        }

        let slack_bot_token = required_trimmed("SLACK_BOT_TOKEN")?;
        let slack_channel_id = required_trimmed("SLACK_BOT_CHANNEL_ID")?;
        // The HMAC key must match the sender's byte for byte
        let signature_secret = required("SECRET_TIMEPAD_PHRASE")?;

        let mut fallbacks = Vec::new();
        let port = parse_or("PORT", lookup("PORT"), 8080, &mut fallbacks);
        let notify_timeout_ms = parse_or(
            "NOTIFY_TIMEOUT_MS",
            lookup("NOTIFY_TIMEOUT_MS"),
            10_000,
            &mut fallbacks,
        );

        Ok(Config {
            slack_bot_token,
            slack_channel_id,
            ticket_webhook_path,
            order_webhook_path,
            signature_secret,

            port,

            slack_api_base_url: lookup("SLACK_API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SLACK_API_BASE_URL.to_string()),

            notify_timeout_ms,

            log_dir: lookup("LOG_DIR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            fallbacks,
        })
    }

    /// Report every default that replaced a malformed variable.
    pub fn log_fallbacks(&self) {
        for fallback in &self.fallbacks {
            warn!(
                env_var = fallback.env_var,
                value = %fallback.value,
                "Invalid value, using default"
            );
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("slack_bot_token", &"<redacted>")
            .field("slack_channel_id", &self.slack_channel_id)
            .field("ticket_webhook_path", &"<redacted>")
            .field("order_webhook_path", &"<redacted>")
            .field("signature_secret", &"<redacted>")
            .field("port", &self.port)
            .field("slack_api_base_url", &self.slack_api_base_url)
            .field("notify_timeout_ms", &self.notify_timeout_ms)
            .field("log_dir", &self.log_dir)
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}

/// Parse an optional value, recording a fallback when it is malformed.
fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    fallbacks: &mut Vec<ConfigFallback>,
) -> T {
    let raw = match raw {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            fallbacks.push(ConfigFallback {
                env_var: name,
                value: raw,
            });
            default
        }
    }
}

/// Make sure a secret path segment is routable as `/segment`.
fn normalize_path(raw: &str) -> String {
    format!("/{}", raw.trim_start_matches('/'))
}

/// Webhook paths must be literal and must not shadow `/health`.
fn is_routable(path: &str) -> bool {
    path != "/health" && !path.contains(':') && !path.contains('*') && !path.contains('{')
}
