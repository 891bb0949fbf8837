// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zte-sms.toml` > `~/.config/zte-sms/zte-sms.toml` >
//! `/etc/zte-sms/zte-sms.toml` with environment variable overrides via the
//! `ZTE_SMS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::ZteSmsConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/zte-sms/zte-sms.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "zte-sms.toml";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zte-sms/zte-sms.toml` (system-wide)
/// 3. `~/.config/zte-sms/zte-sms.toml` (user XDG config)
/// 4. `./zte-sms.toml`, or `explicit` when given
/// 5. `ZTE_SMS_*` environment variables
pub fn load_config(explicit: Option<&Path>) -> Result<ZteSmsConfig, figment::Error> {
    match explicit {
        Some(path) => debug!(path = %path.display(), "loading configuration from explicit file"),
        None => debug!("loading configuration from standard locations"),
    }
    build_figment(explicit).extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ZteSmsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZteSmsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment(explicit: Option<&Path>) -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(ZteSmsConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()));

    let figment = match explicit {
        Some(path) => figment.merge(Toml::file(path)),
        None => figment.merge(Toml::file(LOCAL_CONFIG_FILE)),
    };

    figment.merge(env_provider())
}

/// `~/.config/zte-sms/zte-sms.toml`, when a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("zte-sms").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `ZTE_SMS_ROUTER_BASE_URL`
/// must map to `router.base_url`, not `router.base.url`.
fn env_provider() -> Env {
    Env::prefixed("ZTE_SMS_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("router_", "router.", 1)
            .replacen("bark_", "bark.", 1)
            .replacen("poll_", "poll.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
