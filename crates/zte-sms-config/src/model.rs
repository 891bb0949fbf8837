// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZteSmsConfig {
    /// Router connection and credentials.
    #[serde(default)]
    pub router: RouterConfig,

    /// Bark push relay settings.
    #[serde(default)]
    pub bark: BarkConfig,

    /// Polling cadence and page size.
    #[serde(default)]
    pub poll: PollConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Router web API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Base address of the router's web UI.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Admin password. Required; usually supplied via `-p` or env.
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("base_url", &self.base_url)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://192.168.0.1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// How notifications are submitted to the Bark server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarkMethod {
    /// Title and body in the URL path.
    #[default]
    Get,
    /// Form-encoded POST; suited to long bodies.
    Post,
}

/// Bark push relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BarkConfig {
    /// Device keys. Every key receives every notification.
    #[serde(default)]
    pub keys: Vec<String>,

    /// Notification sound name.
    #[serde(default = "default_sound")]
    pub sound: String,

    /// Bark server root.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Submission method.
    #[serde(default)]
    pub method: BarkMethod,
}

impl Default for BarkConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            sound: default_sound(),
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            method: BarkMethod::default(),
        }
    }
}

impl BarkConfig {
    /// Keys with surrounding whitespace removed and blanks dropped.
    pub fn effective_keys(&self) -> Vec<String> {
        self.keys
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_sound() -> String {
    "healthnotification".to_string()
}

fn default_server_url() -> String {
    "https://api.day.app".to_string()
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Seconds between check cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Messages requested per listing.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            page_size: default_page_size(),
        }
    }
}

fn default_interval_secs() -> u64 {
    3
}

fn default_page_size() -> u32 {
    50
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for the bridge's own crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
