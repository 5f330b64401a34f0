//! Relay configuration loaded from environment variables.
//!
//! | Env Var                 | Required | Default         |
//! |-------------------------|----------|-----------------|
//! | `LINEAR_WEBHOOK_SECRET` | yes      |                 |
//! | `TELEGRAM_BOT_TOKEN`    | yes      |                 |
//! | `TELEGRAM_CHAT_ID`      | yes      |                 |
//! | `BIND_ADDR`             | no       | `0.0.0.0:3000`  |
//! | `WEBHOOK_MAX_AGE_MS`    | no       | `60000`         |
//! | `LINEAR_IP_ALLOWLIST`   | no       | `false`         |
//! | `TELEGRAM_COMMANDS`     | no       | `true`          |

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

use crate::webhooks::{DEFAULT_MAX_AGE_MS, WebhookVerifier};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Errors loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// The single Telegram chat messages are delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// A numeric chat id (negative for groups and channels).
    Id(i64),
    /// A public channel username, including the leading `@`.
    Channel(String),
}

impl ChatTarget {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix('@') {
            return (!name.is_empty()).then(|| ChatTarget::Channel(raw.to_string()));
        }
        raw.parse().ok().map(ChatTarget::Id)
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Channel(name) => f.write_str(name),
        }
    }
}

/// Everything the relay needs to run.
#[derive(Clone)]
pub struct RelayConfig {
    pub webhook_secret: String,
    pub bot_token: String,
    pub chat: ChatTarget,
    pub bind_addr: SocketAddr,
    pub max_age_ms: u64,
    pub ip_allowlist: bool,
    pub bot_commands: bool,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("webhook_secret", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat", &self.chat)
            .field("bind_addr", &self.bind_addr)
            .field("max_age_ms", &self.max_age_ms)
            .field("ip_allowlist", &self.ip_allowlist)
            .field("bot_commands", &self.bot_commands)
            .finish()
    }
}

impl RelayConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let webhook_secret = require("LINEAR_WEBHOOK_SECRET")?;
        let bot_token = require("TELEGRAM_BOT_TOKEN")?;

        let raw_chat = require("TELEGRAM_CHAT_ID")?;
        let chat = ChatTarget::parse(&raw_chat).ok_or_else(|| ConfigError::Invalid {
            name: "TELEGRAM_CHAT_ID",
            value: raw_chat.clone(),
            reason: "expected a numeric chat id or @channel".into(),
        })?;

        let raw_bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw_bind
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: raw_bind.clone(),
                reason: e.to_string(),
            })?;

        let max_age_ms = match get("WEBHOOK_MAX_AGE_MS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "WEBHOOK_MAX_AGE_MS",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_MAX_AGE_MS,
        };

        let ip_allowlist = parse_flag("LINEAR_IP_ALLOWLIST", get("LINEAR_IP_ALLOWLIST"), false)?;
        let bot_commands = parse_flag("TELEGRAM_COMMANDS", get("TELEGRAM_COMMANDS"), true)?;

        Ok(RelayConfig {
            webhook_secret,
            bot_token,
            chat,
            bind_addr,
            max_age_ms,
            ip_allowlist,
            bot_commands,
        })
    }

    /// Builds the webhook verifier for this configuration.
    pub fn verifier(&self) -> WebhookVerifier {
        WebhookVerifier::new(self.webhook_secret.as_bytes())
            .with_max_age_ms(self.max_age_ms)
            .with_allowlist(self.ip_allowlist)
    }
}

fn parse_flag(name: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected true or false".into(),
        }),
    }
}
