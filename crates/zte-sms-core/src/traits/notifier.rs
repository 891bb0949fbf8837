// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier trait for push delivery relays (Bark, etc.).

use async_trait::async_trait;

use crate::error::ZteSmsError;
use crate::types::Notification;

/// A push-notification relay.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable name used in log fields.
    fn name(&self) -> &str;

    /// Delivers one notification. `Ok` means every configured recipient
    /// accepted it.
    async fn deliver(&self, notification: &Notification) -> Result<(), ZteSmsError>;
}
