// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait for an authenticated SMS-capable device session.

use async_trait::async_trait;

use crate::error::ZteSmsError;
use crate::types::{ListQuery, RawSms};

/// An authenticated session with an SMS-capable device.
///
/// Implementations own their authorization state. Mutating calls
/// (`mark_read`) must fail with [`ZteSmsError::NotAuthorized`] without
/// touching the network when no authorization token has been derived.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Probes whether the device still considers this session logged in.
    async fn check_login(&self) -> Result<(), ZteSmsError>;

    /// Lists messages, in device order.
    async fn list_messages(&self, query: &ListQuery) -> Result<Vec<RawSms>, ZteSmsError>;

    /// Marks all `ids` as read in a single request.
    async fn mark_read(&self, ids: &[String]) -> Result<(), ZteSmsError>;

    /// Ends the session. A no-op when the session never obtained a token.
    async fn logout(&mut self) -> Result<(), ZteSmsError>;
}
