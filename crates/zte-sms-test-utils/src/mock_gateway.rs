// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock router session for deterministic pipeline tests.
//!
//! `MockGateway` serves a scripted inbox from `list_messages` and records
//! every call. Clones share state, so a test can hand one clone to the
//! poller and assert on another.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use zte_sms_core::{ListQuery, RawSms, SmsGateway, ZteSmsError};

/// Builds an unread message as the router would list it.
pub fn unread_sms(id: &str, number: &str, content: &str) -> RawSms {
    RawSms {
        id: id.to_string(),
        number: number.to_string(),
        content: content.to_string(),
        date: "24,10,16,09,30,00,+32".to_string(),
        tag: "1".to_string(),
        ..RawSms::default()
    }
}

#[derive(Clone, Default)]
pub struct MockGateway {
    inbox: Arc<Mutex<Vec<RawSms>>>,
    queries: Arc<Mutex<Vec<ListQuery>>>,
    mark_read_calls: Arc<Mutex<Vec<Vec<String>>>>,
    check_login_calls: Arc<AtomicUsize>,
    logout_calls: Arc<AtomicUsize>,
    fail_check_login: Arc<AtomicBool>,
    fail_list: Arc<AtomicBool>,
    fail_mark_read: Arc<AtomicBool>,
}

impl MockGateway {
    /// Create a gateway whose unread inbox is `messages`.
    ///
    /// The inbox is not modified by `mark_read`, mirroring a router that
    /// keeps listing the same messages.
    pub fn with_messages(messages: Vec<RawSms>) -> Self {
        Self {
            inbox: Arc::new(Mutex::new(messages)),
            ..Self::default()
        }
    }

    /// Replace the inbox served by subsequent `list_messages` calls.
    pub async fn set_messages(&self, messages: Vec<RawSms>) {
        *self.inbox.lock().await = messages;
    }

    pub fn fail_check_login(&self, fail: bool) {
        self.fail_check_login.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mark_read(&self, fail: bool) {
        self.fail_mark_read.store(fail, Ordering::SeqCst);
    }

    /// The id batches passed to `mark_read`, including failed attempts.
    pub async fn mark_read_calls(&self) -> Vec<Vec<String>> {
        self.mark_read_calls.lock().await.clone()
    }

    /// Every query passed to `list_messages`.
    pub async fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().await.clone()
    }

    pub fn check_login_calls(&self) -> usize {
        self.check_login_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsGateway for MockGateway {
    async fn check_login(&self) -> Result<(), ZteSmsError> {
        self.check_login_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_check_login.load(Ordering::SeqCst) {
            return Err(ZteSmsError::SessionExpired {
                status: String::new(),
            });
        }
        Ok(())
    }

    async fn list_messages(&self, query: &ListQuery) -> Result<Vec<RawSms>, ZteSmsError> {
        self.queries.lock().await.push(*query);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ZteSmsError::Transport {
                message: "mock list failure".into(),
                source: None,
            });
        }
        let inbox = self.inbox.lock().await;
        Ok(inbox
            .iter()
            .take(query.per_page as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, ids: &[String]) -> Result<(), ZteSmsError> {
        self.mark_read_calls.lock().await.push(ids.to_vec());
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(ZteSmsError::Rejected {
                operation: "SET_MSG_READ",
                result: "failure".into(),
            });
        }
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), ZteSmsError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
