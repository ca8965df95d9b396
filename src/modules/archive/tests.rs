// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::archive::catalog::MailboxCatalog;
use crate::modules::archive::engine::{ArchiveEngine, ArchivePolicy};
use crate::modules::archive::{MailboxClient, MailboxEntry};
use crate::modules::error::{code::ErrorCode, RustArchiverResult};
use crate::raise_error;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List(String),
    Select(String),
    Search(NaiveDate),
    Fetch(String),
    Create(String),
    Move(String, String),
}

/// Scripted protocol client recording every operation the engine issues.
#[derive(Debug, Default)]
struct MockClient {
    entries: Vec<MailboxEntry>,
    search_results: VecDeque<Vec<u32>>,
    fetch_batches: VecDeque<Vec<String>>,
    fail_select: bool,
    fail_create: bool,
    calls: Vec<Call>,
}

impl MockClient {
    fn with_known_mailboxes(names: &[&str]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| MailboxEntry {
                    attributes: Vec::new(),
                    name: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    fn moves(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Move(set, target) => Some((set.clone(), target.clone())),
                _ => None,
            })
            .collect()
    }

    fn creates(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Create(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn fetches(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Fetch(set) => Some(set.clone()),
                _ => None,
            })
            .collect()
    }
}

impl MailboxClient for MockClient {
    async fn list_mailboxes(&mut self, pattern: &str) -> RustArchiverResult<Vec<MailboxEntry>> {
        self.calls.push(Call::List(pattern.to_string()));
        Ok(self.entries.clone())
    }

    async fn select_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        self.calls.push(Call::Select(name.to_string()));
        if self.fail_select {
            return Err(raise_error!(
                format!("could not select mailbox {:?}", name),
                ErrorCode::MailboxSelectionFailed
            ));
        }
        Ok(())
    }

    async fn search_before(&mut self, date: NaiveDate) -> RustArchiverResult<Vec<u32>> {
        self.calls.push(Call::Search(date));
        Ok(self.search_results.pop_front().unwrap_or_default())
    }

    async fn fetch_metadata(&mut self, uid_set: &str) -> RustArchiverResult<Vec<String>> {
        self.calls.push(Call::Fetch(uid_set.to_string()));
        self.fetch_batches.pop_front().ok_or_else(|| {
            raise_error!(
                format!("unexpected fetch of {}", uid_set),
                ErrorCode::InternalError
            )
        })
    }

    async fn move_messages(&mut self, uid_set: &str, target: &str) -> RustArchiverResult<()> {
        self.calls
            .push(Call::Move(uid_set.to_string(), target.to_string()));
        Ok(())
    }

    async fn create_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        self.calls.push(Call::Create(name.to_string()));
        if self.fail_create {
            return Err(raise_error!(
                format!("failed to create mailbox {:?}", name),
                ErrorCode::MailboxCreationFailed
            ));
        }
        Ok(())
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn metadata_line(seq: u32, uid: u32, internal_date: &str) -> String {
    format!("{} (UID {} INTERNALDATE \"{}\")", seq, uid, internal_date)
}

async fn engine_for<'a>(
    client: &'a mut MockClient,
    policy: ArchivePolicy,
) -> ArchiveEngine<&'a mut MockClient> {
    ArchiveEngine::new(client, policy, fixed_now()).await.unwrap()
}

#[tokio::test]
async fn contiguous_same_target_runs_are_moved_together() {
    let mut client = MockClient::with_known_mailboxes(&["Archives"]);
    client.search_results.push_back(vec![12, 10, 11]);
    client.fetch_batches.push_back(vec![
        metadata_line(1, 10, "01-Mar-2022 10:00:00 +0000"),
        metadata_line(2, 11, "15-Apr-2022 10:00:00 +0000"),
        metadata_line(3, 12, "10-Jan-2023 10:00:00 +0000"),
    ]);

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    engine.archive_mailbox("INBOX").await.unwrap();
    drop(engine);

    assert_eq!(client.calls[0], Call::List("Archives*".to_string()));
    assert_eq!(client.calls[1], Call::Select("INBOX".to_string()));
    assert_eq!(client.fetches(), vec!["10:12".to_string()]);
    assert_eq!(
        client.creates(),
        vec!["Archives.2022".to_string(), "Archives.2023".to_string()]
    );
    assert_eq!(
        client.moves(),
        vec![
            ("10:11".to_string(), "Archives.2022".to_string()),
            ("12".to_string(), "Archives.2023".to_string()),
        ]
    );
}

#[tokio::test]
async fn known_targets_are_not_created_again() {
    let mut client =
        MockClient::with_known_mailboxes(&["Archives", "Archives.2022", "Archives.2023"]);
    client.search_results.push_back(vec![10, 11, 12]);
    client.fetch_batches.push_back(vec![
        metadata_line(1, 10, "01-Mar-2022 10:00:00 +0000"),
        metadata_line(2, 11, "15-Apr-2022 10:00:00 +0000"),
        metadata_line(3, 12, "10-Jan-2023 10:00:00 +0000"),
    ]);

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    engine.archive_mailbox("INBOX").await.unwrap();
    drop(engine);

    assert!(client.creates().is_empty());
    assert_eq!(client.moves().len(), 2);
}

#[tokio::test]
async fn search_cutoff_includes_the_boundary_day() {
    // now = 2024-06-01T12:00Z, max age 365 days: the search must ask for
    // messages strictly before 2023-06-02, so a message received exactly
    // 366 days ago (on 2023-06-01) is included and one received 365 days
    // ago (on 2023-06-02) is not.
    let mut client = MockClient::with_known_mailboxes(&["Archives"]);
    client.search_results.push_back(Vec::new());

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    engine.archive_mailbox("INBOX").await.unwrap();
    drop(engine);

    let cutoff = NaiveDate::from_ymd_opt(2023, 6, 2).unwrap();
    assert!(client.calls.contains(&Call::Search(cutoff)));
    assert!(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap() < cutoff);
    assert!(!(NaiveDate::from_ymd_opt(2023, 6, 2).unwrap() < cutoff));
}

#[tokio::test]
async fn batches_are_paged_and_grouped_per_batch() {
    // Three messages with the same target split across two batches end up
    // in two separate moves: grouping never spans a batch boundary.
    let mut client = MockClient::with_known_mailboxes(&["Archives", "Archives.2022"]);
    client.search_results.push_back(vec![10, 11, 12]);
    client.fetch_batches.push_back(vec![
        metadata_line(1, 10, "01-Mar-2022 10:00:00 +0000"),
        metadata_line(2, 11, "15-Apr-2022 10:00:00 +0000"),
    ]);
    client.fetch_batches.push_back(vec![metadata_line(
        3,
        12,
        "20-May-2022 10:00:00 +0000",
    )]);

    let policy = ArchivePolicy {
        max_messages_per_batch: 2,
        ..ArchivePolicy::default()
    };
    let mut engine = engine_for(&mut client, policy).await;
    engine.archive_mailbox("INBOX").await.unwrap();
    drop(engine);

    assert_eq!(
        client.fetches(),
        vec!["10:11".to_string(), "12".to_string()]
    );
    assert_eq!(
        client.moves(),
        vec![
            ("10:11".to_string(), "Archives.2022".to_string()),
            ("12".to_string(), "Archives.2022".to_string()),
        ]
    );
}

#[tokio::test]
async fn second_run_without_aged_messages_is_a_no_op() {
    let mut client = MockClient::with_known_mailboxes(&["Archives"]);
    client.search_results.push_back(vec![10]);
    client.search_results.push_back(Vec::new());
    client
        .fetch_batches
        .push_back(vec![metadata_line(1, 10, "01-Mar-2022 10:00:00 +0000")]);

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    engine.archive_mailbox("INBOX").await.unwrap();
    engine.archive_mailbox("INBOX").await.unwrap();
    drop(engine);

    assert_eq!(client.fetches().len(), 1);
    assert_eq!(client.moves().len(), 1);
}

#[tokio::test]
async fn malformed_metadata_line_aborts_the_batch_before_any_move() {
    let mut client = MockClient::with_known_mailboxes(&["Archives"]);
    client.search_results.push_back(vec![10, 11]);
    client.fetch_batches.push_back(vec![
        metadata_line(1, 10, "01-Mar-2022 10:00:00 +0000"),
        "* BYE logging out".to_string(),
    ]);

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    let err = engine.archive_mailbox("INBOX").await.unwrap_err();
    drop(engine);

    assert_eq!(err.code(), ErrorCode::FetchParseFailed);
    assert!(client.moves().is_empty());
    assert!(client.creates().is_empty());
}

#[tokio::test]
async fn selection_failure_propagates_before_any_search() {
    let mut client = MockClient::with_known_mailboxes(&["Archives"]);
    client.fail_select = true;

    let mut engine = engine_for(&mut client, ArchivePolicy::default()).await;
    let err = engine.archive_mailbox("INBOX").await.unwrap_err();
    drop(engine);

    assert_eq!(err.code(), ErrorCode::MailboxSelectionFailed);
    assert!(client
        .calls
        .iter()
        .all(|call| !matches!(call, Call::Search(_))));
}

#[tokio::test]
async fn catalog_excludes_noselect_entries_and_strips_quotes() {
    let mut client = MockClient::default();
    client.entries = vec![
        MailboxEntry {
            attributes: Vec::new(),
            name: "Archives".to_string(),
        },
        MailboxEntry {
            attributes: vec![r"\HasChildren".to_string()],
            name: "\"Archives.2023.Foo Bar\"".to_string(),
        },
        MailboxEntry {
            attributes: vec![r"\Noselect".to_string()],
            name: "Archives.Old".to_string(),
        },
    ];

    let mut catalog = MailboxCatalog::new();
    catalog.load(&mut client, "Archives*").await.unwrap();

    assert!(catalog.contains("Archives"));
    assert!(catalog.contains("Archives.2023.Foo Bar"));
    assert!(!catalog.contains("Archives.Old"));
}

#[tokio::test]
async fn ensure_exists_creates_once_and_registers() {
    let mut client = MockClient::default();
    let mut catalog = MailboxCatalog::new();

    catalog
        .ensure_exists(&mut client, "Archives.2024")
        .await
        .unwrap();
    catalog
        .ensure_exists(&mut client, "Archives.2024")
        .await
        .unwrap();

    assert_eq!(client.creates(), vec!["Archives.2024".to_string()]);
    assert!(catalog.contains("Archives.2024"));
}

#[tokio::test]
async fn failed_create_propagates_without_registering() {
    let mut client = MockClient {
        fail_create: true,
        ..MockClient::default()
    };
    let mut catalog = MailboxCatalog::new();

    let err = catalog
        .ensure_exists(&mut client, "Archives.2024")
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::MailboxCreationFailed);
    assert!(!catalog.contains("Archives.2024"));
}
