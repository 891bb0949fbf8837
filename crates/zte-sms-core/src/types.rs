// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router session, the notifier, and the pipeline.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

/// Tag filter understood by the router's `sms_data_total` listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SmsTag {
    All,
    Unread,
    Read,
    Sent,
    Draft,
}

impl SmsTag {
    /// Numeric value sent in the `tags` query parameter.
    pub fn code(self) -> u8 {
        match self {
            Self::All => 0,
            Self::Unread => 1,
            Self::Read => 2,
            Self::Sent => 3,
            Self::Draft => 4,
        }
    }
}

/// Pagination and filter parameters for a message listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub tag: SmsTag,
}

impl ListQuery {
    /// First page of unread messages.
    pub fn unread(per_page: u32) -> Self {
        Self {
            page: 0,
            per_page,
            tag: SmsTag::Unread,
        }
    }
}

/// One message exactly as the router lists it.
///
/// `content` is still transport-encoded (base64). Every field defaults to an
/// empty string because firmware revisions omit different keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSms {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub draft_group_id: String,
    #[serde(default)]
    pub received_all_concat_sms: String,
}

/// A normalized message with decoded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub id: String,
    pub number: String,
    pub content: String,
    pub date: String,
    pub is_new: bool,
}

impl SmsMessage {
    /// Normalize a listed message, decoding its content.
    ///
    /// Content that is not valid base64-encoded UTF-8 is kept verbatim so the
    /// message is never dropped.
    pub fn from_raw(raw: RawSms) -> Self {
        let content = match decode_content(&raw.content) {
            Some(decoded) => decoded,
            None => {
                debug!(id = %raw.id, "content is not base64 text, keeping raw value");
                raw.content
            }
        };

        Self {
            is_new: raw.tag == "1",
            id: raw.id,
            number: raw.number,
            content,
            date: raw.date,
        }
    }
}

/// Decode router message content (standard base64 carrying UTF-8).
///
/// Returns `None` if either the base64 or the UTF-8 step fails.
pub fn decode_content(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// A push notification handed to a [`Notifier`](crate::Notifier).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Extra relay parameters (sound, group, level, ...).
    pub options: BTreeMap<String, String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            options: BTreeMap::new(),
        }
    }

    /// Attach a relay option, replacing any previous value for `key`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}
