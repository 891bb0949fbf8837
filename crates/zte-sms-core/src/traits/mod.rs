// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Both traits use `#[async_trait]` so the pipeline can hold them as trait
//! objects.

pub mod gateway;
pub mod notifier;

pub use gateway::SmsGateway;
pub use notifier::Notifier;
