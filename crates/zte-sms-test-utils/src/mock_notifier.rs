// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier that captures deliveries for assertion in tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use zte_sms_core::{Notification, Notifier, ZteSmsError};

/// Records every successful delivery. Deliveries whose body is in the
/// failing set are rejected and not recorded.
#[derive(Clone, Default)]
pub struct MockNotifier {
    delivered: Arc<Mutex<Vec<Notification>>>,
    failing_bodies: Arc<Mutex<HashSet<String>>>,
    attempts: Arc<AtomicUsize>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any notification whose body equals `body`.
    pub async fn fail_on_body(&self, body: impl Into<String>) {
        self.failing_bodies.lock().await.insert(body.into());
    }

    /// Stop rejecting `body`.
    pub async fn recover_body(&self, body: &str) {
        self.failing_bodies.lock().await.remove(body);
    }

    /// Notifications that were delivered successfully, in order.
    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().await.clone()
    }

    pub async fn delivered_count(&self) -> usize {
        self.delivered.lock().await.len()
    }

    /// Every `deliver` call, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ZteSmsError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing_bodies.lock().await.contains(&notification.body) {
            return Err(ZteSmsError::Notify {
                message: format!("mock rejection for body {:?}", notification.body),
                source: None,
            });
        }
        self.delivered.lock().await.push(notification.clone());
        Ok(())
    }
}
