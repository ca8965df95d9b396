// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::archive::catalog::MailboxCatalog;
use crate::modules::archive::decoder::{self, MessageMetadata};
use crate::modules::archive::namer::ArchiveNamer;
use crate::modules::archive::pager;
use crate::modules::archive::uidset;
use crate::modules::archive::MailboxClient;
use crate::modules::error::RustArchiverResult;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use itertools::Itertools;
use tracing::{debug, info};

/// Metadata for one message eligible for archiving. Built per fetch, consumed
/// by the grouping pass, never retained across batches.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub uid: u32,
    pub received_at: DateTime<FixedOffset>,
    pub age_in_days: i64,
    pub target_mailbox: String,
}

/// Tunables for one archiving run.
#[derive(Debug, Clone)]
pub struct ArchivePolicy {
    /// Minimum age in days before a message is eligible for archiving.
    pub max_age_days: u32,
    /// Upper bound on identifiers per fetch/processing round.
    pub max_messages_per_batch: usize,
    /// Prefix for generated archive mailbox names.
    pub archive_root: String,
    /// Hierarchy segment folded out of generated names.
    pub inbox_segment: String,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        Self {
            max_age_days: 365,
            max_messages_per_batch: 50,
            archive_root: "Archives".to_string(),
            inbox_segment: "INBOX".to_string(),
        }
    }
}

/// Drives the archiving of aged messages over a single stateful mailbox
/// session: select, search, fetch in bounded batches, then move each
/// contiguous same-target run into its (created-on-demand) archive mailbox.
///
/// The engine owns the session and the mailbox catalog for exactly one run;
/// `now` is captured by the caller so every age computation of the run uses
/// the same cutoff.
pub struct ArchiveEngine<C> {
    client: C,
    catalog: MailboxCatalog,
    namer: ArchiveNamer,
    now: DateTime<Utc>,
    max_age_days: u32,
    batch_size: usize,
}

impl<C: MailboxClient> ArchiveEngine<C> {
    /// Builds an engine and seeds its catalog with the archive mailboxes
    /// already present under the policy's archive root.
    pub async fn new(
        mut client: C,
        policy: ArchivePolicy,
        now: DateTime<Utc>,
    ) -> RustArchiverResult<Self> {
        let mut catalog = MailboxCatalog::new();
        catalog
            .load(&mut client, &format!("{}*", policy.archive_root))
            .await?;
        Ok(Self {
            client,
            catalog,
            namer: ArchiveNamer::new(policy.archive_root, policy.inbox_segment),
            now,
            max_age_days: policy.max_age_days,
            batch_size: policy.max_messages_per_batch,
        })
    }

    /// The day handed to the date-before search. The search is exclusive of
    /// the given day, so this is the first day considered too young:
    /// snapshot minus `max_age_days`. A message exactly `max_age_days + 1`
    /// days old falls on an earlier day and is included; one day younger is
    /// not.
    pub fn cutoff_date(&self) -> NaiveDate {
        (self.now - Duration::days(i64::from(self.max_age_days))).date_naive()
    }

    /// Archives every aged message in `mailbox`. Errors propagate to the
    /// caller; a failure mid-run leaves earlier batches moved and the rest
    /// untouched, and a re-run picks up exactly the messages still aged and
    /// unmoved.
    pub async fn archive_mailbox(&mut self, mailbox: &str) -> RustArchiverResult<()> {
        self.client.select_mailbox(mailbox).await?;

        let cutoff = self.cutoff_date();
        let mut uids = self.client.search_before(cutoff).await?;
        if uids.is_empty() {
            info!("no messages older than {} in {:?}", cutoff, mailbox);
            return Ok(());
        }
        // Server order is not guaranteed ascending.
        uids.sort_unstable();
        info!("{} aged messages found in {:?}", uids.len(), mailbox);

        for batch in pager::pages(&uids, self.batch_size)? {
            self.archive_batch(mailbox, batch).await?;
        }
        Ok(())
    }

    async fn archive_batch(&mut self, mailbox: &str, batch: &[u32]) -> RustArchiverResult<()> {
        let uid_set = uidset::compress(batch)?;
        let lines = self.client.fetch_metadata(&uid_set).await?;

        let mut records = Vec::with_capacity(lines.len());
        for line in &lines {
            let metadata = decoder::parse_metadata_line(line)?;
            records.push(self.build_record(mailbox, metadata));
        }
        records.sort_unstable_by_key(|record| record.uid);

        // Runs are adjacency-only: a new run starts whenever the target
        // changes, and runs with the same target in different batches are
        // moved separately. Each round trip stays bounded by the batch size.
        let runs = records
            .iter()
            .chunk_by(|record| record.target_mailbox.clone());
        for (target, run) in &runs {
            let run_uids: Vec<u32> = run.map(|record| record.uid).collect();
            self.catalog
                .ensure_exists(&mut self.client, &target)
                .await?;
            let run_set = uidset::compress(&run_uids)?;
            info!("moving {} from {:?} to {:?}", run_set, mailbox, target);
            self.client.move_messages(&run_set, &target).await?;
        }
        Ok(())
    }

    /// Hands the session back to the caller, e.g. for a final logout.
    pub fn into_client(self) -> C {
        self.client
    }

    fn build_record(&self, mailbox: &str, metadata: MessageMetadata) -> MessageRecord {
        let record = MessageRecord {
            uid: metadata.uid,
            received_at: metadata.internal_date,
            age_in_days: self
                .now
                .signed_duration_since(metadata.internal_date)
                .num_days(),
            target_mailbox: self.namer.name(metadata.internal_date.year(), mailbox),
        };
        debug!(
            "uid {} of {:?} received {} is {} days old, target {:?}",
            record.uid, mailbox, record.received_at, record.age_in_days, record.target_mailbox
        );
        record
    }
}
