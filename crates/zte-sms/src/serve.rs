// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup sequence: tracing, router login, notifier, poll loop.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use zte_sms_agent::{Poller, shutdown};
use zte_sms_bark::BarkNotifier;
use zte_sms_config::ZteSmsConfig;
use zte_sms_core::ZteSmsError;
use zte_sms_router::ZteSession;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise zte-sms crates log at `log_level` and
/// dependencies at `warn`.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zte_sms={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Log in, then poll until SIGINT or SIGTERM.
///
/// A failed login is returned as an error; the caller exits non-zero.
pub async fn run_serve(config: ZteSmsConfig) -> Result<(), ZteSmsError> {
    info!(
        router = %config.router.base_url,
        interval_secs = config.poll.interval_secs,
        "starting zte-sms"
    );

    let password = config
        .router
        .password
        .as_deref()
        .ok_or_else(|| ZteSmsError::Config("router password is not set".into()))?;

    let mut session = ZteSession::from_config(&config.router)?;
    let outcome = session.login(password).await?;
    info!(?outcome, "logged in to router");

    let notifier = BarkNotifier::from_config(&config.bark)?;
    info!(
        keys = notifier.key_count(),
        method = ?config.bark.method,
        "Bark notifier ready"
    );

    let cancel = shutdown::install_signal_handler();
    let poller = Poller::from_config(Box::new(session), Arc::new(notifier), &config.poll);
    let ledger = poller.run(cancel).await;

    info!(delivered = ledger.len(), "zte-sms stopped");
    Ok(())
}
