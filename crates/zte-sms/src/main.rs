// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! zte-sms - forwards SMS received by a ZTE router to Bark.
//!
//! This is the binary entry point.

mod serve;

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use zte_sms_config::Overrides;

/// Forward SMS from a ZTE router to Bark push notifications.
#[derive(Parser, Debug)]
#[command(name = "zte-sms", version, about, long_about = None)]
struct Cli {
    /// Router admin password.
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Bark device keys, comma-separated.
    #[arg(short = 'b', long = "bark-keys", value_name = "KEY1,KEY2")]
    bark_keys: Option<String>,

    /// Bark notification sound.
    #[arg(short = 's', long)]
    sound: Option<String>,

    /// Router base URL.
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Seconds between polls.
    #[arg(short = 'i', long, value_name = "SECONDS")]
    interval: Option<u64>,

    /// Messages fetched per poll.
    #[arg(long, value_name = "N")]
    page_size: Option<u32>,

    /// Configuration file used instead of ./zte-sms.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            password: self.password.clone(),
            bark_keys: self.bark_keys.clone(),
            sound: self.sound.clone(),
            base_url: self.url.clone(),
            interval_secs: self.interval,
            page_size: self.page_size,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match zte_sms_config::load_and_validate(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(errors) => {
            zte_sms_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.logging.level);

    if let Err(e) = serve::run_serve(config).await {
        error!(error = %e, "zte-sms stopped with an error");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "zte-sms", "-p", "secret", "-b", "k1, k2", "-s", "bell", "-i", "10",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.password.as_deref(), Some("secret"));
        assert_eq!(overrides.bark_keys.as_deref(), Some("k1, k2"));
        assert_eq!(overrides.sound.as_deref(), Some("bell"));
        assert_eq!(overrides.interval_secs, Some(10));
        assert_eq!(overrides.base_url, None);
    }

    #[test]
    fn long_flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "zte-sms",
            "--url",
            "http://10.0.0.1",
            "--page-size",
            "20",
            "--config",
            "/tmp/zte-sms.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/zte-sms.toml")));
        let overrides = cli.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://10.0.0.1"));
        assert_eq!(overrides.page_size, Some(20));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn cli_flags_win_over_file_values() {
        let toml = r#"
[router]
password = "from-file"

[bark]
keys = ["file-key"]

[poll]
interval_secs = 30
"#;
        let cli = Cli::try_parse_from(["zte-sms", "-p", "from-cli", "-b", "a,b", "-i", "5"]).unwrap();
        let config = zte_sms_config::load_and_validate_str(toml, cli.overrides()).unwrap();

        assert_eq!(config.router.password.as_deref(), Some("from-cli"));
        assert_eq!(config.bark.keys, vec!["a", "b"]);
        assert_eq!(config.poll.interval_secs, 5);
    }

    #[test]
    fn rejects_non_numeric_interval() {
        assert!(Cli::try_parse_from(["zte-sms", "-i", "soon"]).is_err());
    }
}
