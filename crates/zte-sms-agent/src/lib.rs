// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The polling side of the zte-sms bridge.
//!
//! [`run_cycle`] performs one check, fetch, notify and acknowledge pass.
//! [`Poller`] repeats it on a fixed interval until a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires, then
//! logs out of the router.

pub mod pipeline;
pub mod poller;
pub mod shutdown;

pub use pipeline::{AbortReason, CycleOutcome, CycleReport, DedupLedger, preview, run_cycle};
pub use poller::Poller;
pub use shutdown::install_signal_handler;
