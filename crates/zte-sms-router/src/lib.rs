// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session protocol client for ZTE routers (F50 Pro and relatives).
//!
//! The router's web API authenticates with a salted password digest and
//! then authorizes every mutating call with a token (`AD`) derived from the
//! firmware version strings and a server-issued randomizer. [`ZteSession`]
//! implements that handshake and exposes it to the polling pipeline through
//! [`SmsGateway`].

pub mod client;
pub mod crypto;
pub mod state;
pub mod wire;

use async_trait::async_trait;
use zte_sms_core::{ListQuery, RawSms, SmsGateway, ZteSmsError};

pub use client::ZteSession;
pub use state::{SessionState, VersionSeeds};
pub use wire::LoginOutcome;

#[async_trait]
impl SmsGateway for ZteSession {
    async fn check_login(&self) -> Result<(), ZteSmsError> {
        ZteSession::check_login(self).await
    }

    async fn list_messages(&self, query: &ListQuery) -> Result<Vec<RawSms>, ZteSmsError> {
        ZteSession::list_messages(self, query).await
    }

    async fn mark_read(&self, ids: &[String]) -> Result<(), ZteSmsError> {
        ZteSession::mark_read(self, ids).await
    }

    async fn logout(&mut self) -> Result<(), ZteSmsError> {
        ZteSession::logout(self).await
    }
}
