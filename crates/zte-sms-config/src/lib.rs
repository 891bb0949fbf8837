// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the zte-sms bridge.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, command-line overrides, and diagnostic error rendering with
//! typo suggestions.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_str};
pub use model::{BarkConfig, BarkMethod, LoggingConfig, PollConfig, RouterConfig, ZteSmsConfig};

/// Values supplied on the command line. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub password: Option<String>,
    /// Comma-separated Bark keys.
    pub bark_keys: Option<String>,
    pub sound: Option<String>,
    pub base_url: Option<String>,
    pub interval_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub log_level: Option<String>,
}

impl Overrides {
    /// Apply every supplied value on top of `config`.
    pub fn apply(self, config: &mut ZteSmsConfig) {
        if let Some(password) = self.password {
            config.router.password = Some(password);
        }
        if let Some(keys) = self.bark_keys {
            config.bark.keys = keys.split(',').map(|k| k.trim().to_string()).collect();
        }
        if let Some(sound) = self.sound {
            config.bark.sound = sound;
        }
        if let Some(base_url) = self.base_url {
            config.router.base_url = base_url;
        }
        if let Some(interval) = self.interval_secs {
            config.poll.interval_secs = interval;
        }
        if let Some(page_size) = self.page_size {
            config.poll.page_size = page_size;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

/// Load configuration from the hierarchy, apply `overrides`, and validate.
///
/// Returns either a valid config or every diagnostic found.
pub fn load_and_validate(
    explicit: Option<&Path>,
    overrides: Overrides,
) -> Result<ZteSmsConfig, Vec<ConfigError>> {
    match loader::load_config(explicit) {
        Ok(mut config) => {
            overrides.apply(&mut config);
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources(explicit);
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string, apply `overrides`, and validate.
pub fn load_and_validate_str(
    toml_content: &str,
    overrides: Overrides,
) -> Result<ZteSmsConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(mut config) => {
            overrides.apply(&mut config);
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
    if let Some(user) = loader::user_config_path() {
        candidates.push(user);
    }
    match explicit {
        Some(path) => candidates.push(path.to_path_buf()),
        None => candidates.push(
            std::env::current_dir()
                .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
                .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into()),
        ),
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
