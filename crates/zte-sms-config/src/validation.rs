// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every problem instead of stopping at the first one, so a single
//! startup attempt reports all missing flags.

use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::ZteSmsConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &ZteSmsConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.router.password.as_deref() {
        Some(p) if !p.is_empty() => {}
        _ => errors.push(ConfigError::missing("router.password")),
    }

    if config.bark.effective_keys().is_empty() {
        errors.push(ConfigError::missing("bark.keys"));
    }

    if let Err(message) = check_http_url("router.base_url", &config.router.base_url) {
        errors.push(ConfigError::Validation { message });
    }

    if let Err(message) = check_http_url("bark.server_url", &config.bark.server_url) {
        errors.push(ConfigError::Validation { message });
    }

    let positive = [
        ("router.timeout_secs", config.router.timeout_secs),
        ("bark.timeout_secs", config.bark.timeout_secs),
        ("poll.interval_secs", config.poll.interval_secs),
        ("poll.page_size", u64::from(config.poll.page_size)),
    ];
    for (key, value) in positive {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1, got 0"),
            });
        }
    }

    if !VALID_LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `value` must parse as an absolute `http` or `https` URL with a host.
fn check_http_url(key: &str, value: &str) -> Result<(), String> {
    let url = Url::parse(value.trim())
        .map_err(|e| format!("{key} `{value}` is not a valid URL: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "{key} `{value}` must use http or https, not {}",
            url.scheme()
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("{key} `{value}` has no host"));
    }
    Ok(())
}
