// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One poll cycle: liveness check, fetch, decode, dedup, notify, acknowledge.
//!
//! A cycle never fails as a whole. Problems are logged and reflected in the
//! returned [`CycleOutcome`]; the next cycle starts from a clean slate apart
//! from the [`DedupLedger`].

use std::collections::HashSet;

use tracing::{debug, info, warn};
use zte_sms_core::{ListQuery, Notification, Notifier, SmsGateway, SmsMessage, ZteSmsError};

/// Characters of message content shown in log lines.
const PREVIEW_CHARS: usize = 30;

/// Ids of messages already delivered in this process.
///
/// Entries are only ever added. A message is recorded after its notification
/// succeeded, before the router has acknowledged it, so a failed
/// acknowledgement never causes a second notification.
#[derive(Debug, Clone, Default)]
pub struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Returns `false` if `id` was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.seen.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }
}

/// Why a cycle stopped before notifying anything.
#[derive(Debug)]
pub enum AbortReason {
    /// The router no longer reports the session as logged in.
    SessionCheck(ZteSmsError),
    /// Listing unread messages failed.
    Fetch(ZteSmsError),
}

/// Counters for a cycle that reached the notify stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub duplicates: usize,
    /// Listed entries without an id; never notified or acknowledged.
    pub missing_id: usize,
    pub notified: usize,
    pub failed: usize,
    /// `None` when nothing needed acknowledging.
    pub acknowledged: Option<bool>,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Aborted(AbortReason),
    Completed(CycleReport),
}

impl CycleOutcome {
    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            CycleOutcome::Completed(report) => Some(report),
            CycleOutcome::Aborted(_) => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, CycleOutcome::Aborted(_))
    }
}

/// First [`PREVIEW_CHARS`] characters of `content`, cut on a char boundary.
pub fn preview(content: &str) -> &str {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

/// Notification for one incoming message.
fn notification_for(message: &SmsMessage) -> Notification {
    Notification::new(format!("SMS from {}", message.number), message.content.clone())
}

/// Runs a single poll cycle against `gateway`, delivering new messages via
/// `notifier`.
pub async fn run_cycle(
    gateway: &dyn SmsGateway,
    notifier: &dyn Notifier,
    ledger: &mut DedupLedger,
    page_size: u32,
) -> CycleOutcome {
    if let Err(e) = gateway.check_login().await {
        warn!(error = %e, "router session check failed, skipping cycle");
        return CycleOutcome::Aborted(AbortReason::SessionCheck(e));
    }

    let listed = match gateway.list_messages(&ListQuery::unread(page_size)).await {
        Ok(listed) => listed,
        Err(e) => {
            warn!(error = %e, "failed to list unread messages");
            return CycleOutcome::Aborted(AbortReason::Fetch(e));
        }
    };

    let mut report = CycleReport {
        fetched: listed.len(),
        ..CycleReport::default()
    };
    if listed.is_empty() {
        debug!("no unread messages");
        return CycleOutcome::Completed(report);
    }
    info!(count = listed.len(), "found unread messages");

    let mut delivered = Vec::new();
    for raw in listed {
        if raw.id.trim().is_empty() {
            warn!(number = %raw.number, "listed message has no id, skipping");
            report.missing_id += 1;
            continue;
        }
        if ledger.contains(&raw.id) {
            report.duplicates += 1;
            continue;
        }

        let message = SmsMessage::from_raw(raw);
        match notifier.deliver(&notification_for(&message)).await {
            Ok(()) => {
                info!(
                    id = %message.id,
                    number = %message.number,
                    preview = preview(&message.content),
                    notifier = notifier.name(),
                    "notified"
                );
                ledger.insert(message.id.clone());
                delivered.push(message.id);
                report.notified += 1;
            }
            Err(e) => {
                warn!(id = %message.id, error = %e, "notification failed, will retry next cycle");
                report.failed += 1;
            }
        }
    }

    if !delivered.is_empty() {
        match gateway.mark_read(&delivered).await {
            Ok(()) => {
                info!(count = delivered.len(), "marked messages as read");
                report.acknowledged = Some(true);
            }
            Err(e) => {
                warn!(error = %e, count = delivered.len(), "failed to mark messages as read");
                report.acknowledged = Some(false);
            }
        }
    }

    CycleOutcome::Completed(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use zte_sms_test_utils::{MockGateway, MockNotifier, unread_sms};

    fn ids(batch: &[String]) -> Vec<&str> {
        batch.iter().map(String::as_str).collect()
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        assert_eq!(preview("short"), "short");
        let long = "验".repeat(40);
        assert_eq!(preview(&long).chars().count(), 30);
        assert_eq!(preview(&"a".repeat(30)), "a".repeat(30));
    }

    #[test]
    fn ledger_insert_reports_novelty() {
        let mut ledger = DedupLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.insert("1"));
        assert!(!ledger.insert("1"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec!["1"]);
    }

    #[tokio::test]
    async fn session_check_failure_aborts_before_fetch() {
        let gateway = MockGateway::with_messages(vec![unread_sms("1", "+1555", "SGVsbG8=")]);
        gateway.fail_check_login(true);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        assert!(matches!(
            outcome,
            CycleOutcome::Aborted(AbortReason::SessionCheck(ZteSmsError::SessionExpired { .. }))
        ));
        assert!(gateway.queries().await.is_empty());
        assert_eq!(notifier.attempts(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_aborts() {
        let gateway = MockGateway::default();
        gateway.fail_list(true);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        assert!(matches!(outcome, CycleOutcome::Aborted(AbortReason::Fetch(_))));
        assert!(gateway.mark_read_calls().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_uses_unread_filter_and_page_size() {
        let gateway = MockGateway::default();
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 20).await;

        assert_eq!(outcome.report(), Some(&CycleReport::default()));
        assert_eq!(gateway.queries().await, vec![ListQuery::unread(20)]);
        assert!(gateway.mark_read_calls().await.is_empty());
    }

    #[tokio::test]
    async fn notifies_in_device_order_and_acknowledges_once() {
        let gateway = MockGateway::with_messages(vec![
            unread_sms("3", "+1555", "dGhyZWU="),
            unread_sms("2", "10086", "dHdv"),
            unread_sms("1", "+1555", "b25l"),
        ]);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        let bodies: Vec<String> = notifier.delivered().await.into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["three", "two", "one"]);
        let calls = gateway.mark_read_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(ids(&calls[0]), vec!["3", "2", "1"]);
        assert_eq!(
            outcome.report(),
            Some(&CycleReport {
                fetched: 3,
                duplicates: 0,
                missing_id: 0,
                notified: 3,
                failed: 0,
                acknowledged: Some(true),
            })
        );
    }

    #[tokio::test]
    async fn undecodable_content_is_delivered_raw() {
        let gateway =
            MockGateway::with_messages(vec![unread_sms("7", "95588", "not base64 at all!")]);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        let delivered = notifier.delivered().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].body, "not base64 at all!");
        assert_eq!(delivered[0].title, "SMS from 95588");
        assert!(ledger.contains("7"));
    }

    #[tokio::test]
    async fn notify_failure_is_isolated_and_not_acknowledged() {
        let gateway = MockGateway::with_messages(vec![
            unread_sms("2", "+1555", "YmFk"),
            unread_sms("1", "+1555", "Z29vZA=="),
        ]);
        let notifier = MockNotifier::new();
        notifier.fail_on_body("bad").await;
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        let report = outcome.report().unwrap();
        assert_eq!((report.notified, report.failed), (1, 1));
        assert!(!ledger.contains("2"));
        assert!(ledger.contains("1"));
        assert_eq!(ids(&gateway.mark_read_calls().await[0]), vec!["1"]);

        // The failed message is retried on the next cycle.
        notifier.recover_body("bad").await;
        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;
        let report = outcome.report().unwrap();
        assert_eq!((report.notified, report.duplicates), (1, 1));
        assert_eq!(ids(&gateway.mark_read_calls().await[1]), vec!["2"]);
    }

    #[tokio::test]
    async fn messages_without_id_are_skipped() {
        let gateway = MockGateway::with_messages(vec![
            unread_sms("", "+1555", "Zmlyc3Q="),
            unread_sms(" ", "10086", "c2Vjb25k"),
            unread_sms("9", "95588", "dGhpcmQ="),
        ]);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        let report = outcome.report().unwrap();
        assert_eq!((report.missing_id, report.notified, report.duplicates), (2, 1, 0));
        assert_eq!(notifier.delivered().await[0].body, "third");
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec!["9"]);
        assert_eq!(gateway.mark_read_calls().await, vec![vec!["9".to_string()]]);
    }

    #[tokio::test]
    async fn all_notifications_failing_skips_acknowledgement() {
        let gateway = MockGateway::with_messages(vec![unread_sms("1", "+1555", "YmFk")]);
        let notifier = MockNotifier::new();
        notifier.fail_on_body("bad").await;
        let mut ledger = DedupLedger::new();

        let outcome = run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        assert_eq!(outcome.report().unwrap().acknowledged, None);
        assert!(gateway.mark_read_calls().await.is_empty());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn acknowledgement_failure_keeps_ledger() {
        let gateway = MockGateway::with_messages(vec![unread_sms("1", "+1555", "SGVsbG8=")]);
        gateway.fail_mark_read(true);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        let first = run_cycle(&gateway, &notifier, &mut ledger, 50).await;
        assert_eq!(first.report().unwrap().acknowledged, Some(false));
        assert!(ledger.contains("1"));

        // Still unread on the router, but not delivered again.
        let second = run_cycle(&gateway, &notifier, &mut ledger, 50).await;
        assert_eq!(second.report().unwrap().duplicates, 1);
        assert_eq!(notifier.delivered_count().await, 1);
        assert_eq!(gateway.mark_read_calls().await.len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_truncated_preview() {
        // "0123456789" x4, base64 encoded.
        let gateway = MockGateway::with_messages(vec![unread_sms(
            "1",
            "+1555",
            "MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTIzNDU2Nzg5MDEyMzQ1Njc4OQ==",
        )]);
        let notifier = MockNotifier::new();
        let mut ledger = DedupLedger::new();

        run_cycle(&gateway, &notifier, &mut ledger, 50).await;

        assert!(logs_contain("preview=\"012345678901234567890123456789\""));
        assert!(!logs_contain("0123456789012345678901234567890"));
    }
}
