// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::RustArchiverResult;
use chrono::NaiveDate;

pub mod catalog;
pub mod decoder;
pub mod engine;
pub mod namer;
pub mod pager;
pub mod uidset;
#[cfg(test)]
mod tests;

/// One entry of a mailbox LIST response: the server's name attributes
/// (e.g. `\Noselect`, `\HasChildren`) and the decoded mailbox name.
#[derive(Debug, Clone)]
pub struct MailboxEntry {
    pub attributes: Vec<String>,
    pub name: String,
}

/// The mailbox-protocol operations the archiving engine drives.
///
/// The connection is stateful: `select_mailbox` scopes every following
/// `search_before`, `fetch_metadata` and `move_messages` call to the selected
/// mailbox, so implementations must issue operations strictly in the order
/// the engine calls them. The production implementation lives in
/// [`crate::modules::imap::executor::ImapExecutor`]; tests drive the engine
/// with a scripted mock.
#[allow(async_fn_in_trait)]
pub trait MailboxClient {
    /// LIST mailboxes matching a glob-style pattern.
    async fn list_mailboxes(&mut self, pattern: &str) -> RustArchiverResult<Vec<MailboxEntry>>;

    /// SELECT a mailbox in read-write mode.
    async fn select_mailbox(&mut self, name: &str) -> RustArchiverResult<()>;

    /// UID SEARCH for messages whose internal date is before the given day.
    /// The returned identifiers carry no ordering guarantee.
    async fn search_before(&mut self, date: NaiveDate) -> RustArchiverResult<Vec<u32>>;

    /// UID FETCH `(UID INTERNALDATE)` for a compressed identifier set,
    /// returning one raw metadata line per message.
    async fn fetch_metadata(&mut self, uid_set: &str) -> RustArchiverResult<Vec<String>>;

    /// UID MOVE a compressed identifier set into the target mailbox.
    async fn move_messages(&mut self, uid_set: &str, target: &str) -> RustArchiverResult<()>;

    /// CREATE a mailbox.
    async fn create_mailbox(&mut self, name: &str) -> RustArchiverResult<()>;
}

impl<C: MailboxClient> MailboxClient for &mut C {
    async fn list_mailboxes(&mut self, pattern: &str) -> RustArchiverResult<Vec<MailboxEntry>> {
        (**self).list_mailboxes(pattern).await
    }

    async fn select_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        (**self).select_mailbox(name).await
    }

    async fn search_before(&mut self, date: NaiveDate) -> RustArchiverResult<Vec<u32>> {
        (**self).search_before(date).await
    }

    async fn fetch_metadata(&mut self, uid_set: &str) -> RustArchiverResult<Vec<String>> {
        (**self).fetch_metadata(uid_set).await
    }

    async fn move_messages(&mut self, uid_set: &str, target: &str) -> RustArchiverResult<()> {
        (**self).move_messages(uid_set, target).await
    }

    async fn create_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        (**self).create_mailbox(name).await
    }
}
