// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-interval driver for [`run_cycle`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zte_sms_config::PollConfig;
use zte_sms_core::{Notifier, SmsGateway};

use crate::pipeline::{CycleOutcome, DedupLedger, run_cycle};

/// Shortest accepted poll interval; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Runs poll cycles one at a time until cancelled.
///
/// The first cycle starts immediately. Cancellation is observed between
/// cycles only; a cycle in progress always runs to completion.
pub struct Poller {
    gateway: Box<dyn SmsGateway>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    page_size: u32,
    ledger: DedupLedger,
}

impl Poller {
    /// Intervals shorter than one millisecond are raised to it.
    pub fn new(
        gateway: Box<dyn SmsGateway>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
        page_size: u32,
    ) -> Self {
        Self {
            gateway,
            notifier,
            interval: interval.max(MIN_INTERVAL),
            page_size,
            ledger: DedupLedger::new(),
        }
    }

    pub fn from_config(
        gateway: Box<dyn SmsGateway>,
        notifier: Arc<dyn Notifier>,
        config: &PollConfig,
    ) -> Self {
        Self::new(
            gateway,
            notifier,
            Duration::from_secs(config.interval_secs),
            config.page_size,
        )
    }

    /// Polls until `cancel` fires, then logs out and returns the ledger.
    pub async fn run(mut self, cancel: CancellationToken) -> DedupLedger {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.interval.as_secs(),
            page_size = self.page_size,
            "poller started"
        );

        let mut cycles: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(cycles, "shutdown requested, stopping poller");
                    break;
                }
                _ = ticker.tick() => {}
            }

            cycles += 1;
            let outcome = run_cycle(
                self.gateway.as_ref(),
                self.notifier.as_ref(),
                &mut self.ledger,
                self.page_size,
            )
            .await;

            match outcome {
                CycleOutcome::Completed(report) => debug!(cycle = cycles, ?report, "cycle completed"),
                CycleOutcome::Aborted(reason) => debug!(cycle = cycles, ?reason, "cycle aborted"),
            }
        }

        match self.gateway.logout().await {
            Ok(()) => info!("logged out"),
            Err(e) => warn!(error = %e, "logout failed"),
        }

        self.ledger
    }
}
