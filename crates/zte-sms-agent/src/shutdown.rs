// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signal handling for graceful shutdown.
//!
//! Installs handlers for SIGTERM and SIGINT (Ctrl+C), triggering a
//! [`CancellationToken`] that the poller checks between cycles.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// The handlers are registered before this function returns, so a signal
/// arriving at any later point cancels the returned token instead of
/// terminating the process. Must be called from within a tokio runtime.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();

    let signals = match ShutdownSignals::register() {
        Ok(signals) => signals,
        Err(e) => {
            warn!(error = %e, "failed to install signal handlers; signals will end the process without logout");
            return token;
        }
    };

    let token_clone = token.clone();
    tokio::spawn(async move {
        signals.recv().await;
        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

#[cfg(unix)]
struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let interrupt = signal(SignalKind::interrupt())?;
        let terminate = match signal(SignalKind::terminate()) {
            Ok(terminate) => Some(terminate),
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler, watching SIGINT only");
                None
            }
        };
        Ok(Self {
            interrupt,
            terminate,
        })
    }

    async fn recv(mut self) {
        let terminate = async {
            match self.terminate.as_mut() {
                Some(terminate) => terminate.recv().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = self.interrupt.recv() => {
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
            _ = terminate => {
                info!("received SIGTERM, initiating shutdown");
            }
        }
    }
}

#[cfg(windows)]
struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl ShutdownSignals {
    fn register() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(mut self) {
        self.ctrl_c.recv().await;
        info!("received Ctrl+C, initiating shutdown");
    }
}
