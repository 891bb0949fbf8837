// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bark push notifications for zte-sms.
//!
//! [`BarkNotifier`] delivers a [`Notification`](zte_sms_core::Notification)
//! to every configured device key and implements the
//! [`Notifier`](zte_sms_core::Notifier) trait used by the polling pipeline.

pub mod client;

pub use client::BarkNotifier;
