// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::archive::{MailboxClient, MailboxEntry};
use crate::modules::error::code::ErrorCode;
use crate::modules::error::RustArchiverResult;
use crate::modules::imap::session::SessionStream;
use crate::{decode_mailbox_name, encode_mailbox_name, raise_error};
use async_imap::types::{Fetch, Name, NameAttribute};
use async_imap::Session;
use chrono::NaiveDate;
use futures::TryStreamExt;

/// The FETCH items the archiver needs: unique id and server receive date.
const METADATA_QUERY: &str = "(UID INTERNALDATE)";

/// The production [`MailboxClient`] over one authenticated IMAP session.
pub struct ImapExecutor {
    session: Session<Box<dyn SessionStream>>,
}

impl ImapExecutor {
    pub fn new(session: Session<Box<dyn SessionStream>>) -> Self {
        Self { session }
    }

    pub async fn logout(&mut self) -> RustArchiverResult<()> {
        self.session
            .logout()
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::ImapCommandFailed))
    }
}

impl MailboxClient for ImapExecutor {
    async fn list_mailboxes(&mut self, pattern: &str) -> RustArchiverResult<Vec<MailboxEntry>> {
        let list = self
            .session
            .list(Some(""), Some(pattern))
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::ImapCommandFailed))?;
        let names = list
            .try_collect::<Vec<Name>>()
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::ImapCommandFailed))?;
        Ok(names
            .iter()
            .map(|name| MailboxEntry {
                attributes: name.attributes().iter().map(attribute_to_string).collect(),
                name: decode_mailbox_name!(name.name()),
            })
            .collect())
    }

    async fn select_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        self.session
            .select(wire_mailbox_name(name))
            .await
            .map_err(|e| {
                raise_error!(
                    format!("could not select mailbox {:?}: {:#?}", name, e),
                    ErrorCode::MailboxSelectionFailed
                )
            })?;
        Ok(())
    }

    async fn search_before(&mut self, date: NaiveDate) -> RustArchiverResult<Vec<u32>> {
        let query = format!("BEFORE {}", date.format("%d-%b-%Y"));
        let uids = self
            .session
            .uid_search(&query)
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::SearchFailed))?;
        Ok(uids.into_iter().collect())
    }

    async fn fetch_metadata(&mut self, uid_set: &str) -> RustArchiverResult<Vec<String>> {
        let list = self
            .session
            .uid_fetch(uid_set, METADATA_QUERY)
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::ImapCommandFailed))?;
        let fetches = list
            .try_collect::<Vec<Fetch>>()
            .await
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::ImapCommandFailed))?;
        fetches.iter().map(render_metadata_line).collect()
    }

    async fn move_messages(&mut self, uid_set: &str, target: &str) -> RustArchiverResult<()> {
        self.session
            .uid_mv(uid_set, wire_mailbox_name(target))
            .await
            .map_err(|e| {
                raise_error!(
                    format!("failed to move {} to {:?}: {:#?}", uid_set, target, e),
                    ErrorCode::ArchiveMoveFailed
                )
            })
    }

    async fn create_mailbox(&mut self, name: &str) -> RustArchiverResult<()> {
        self.session
            .create(wire_mailbox_name(name))
            .await
            .map_err(|e| {
                raise_error!(
                    format!("failed to create mailbox {:?}: {:#?}", name, e),
                    ErrorCode::MailboxCreationFailed
                )
            })
    }
}

// Archive mailbox names may contain spaces and non-ASCII characters; on the
// wire they must be UTF-7 encoded and, when they contain a space, quoted.
fn wire_mailbox_name(name: &str) -> String {
    let encoded = encode_mailbox_name!(name);
    if encoded.contains(' ') {
        format!("\"{}\"", encoded)
    } else {
        encoded
    }
}

fn attribute_to_string(attribute: &NameAttribute) -> String {
    match attribute {
        NameAttribute::NoInferiors => r"\Noinferiors".to_string(),
        NameAttribute::NoSelect => r"\Noselect".to_string(),
        NameAttribute::Marked => r"\Marked".to_string(),
        NameAttribute::Unmarked => r"\Unmarked".to_string(),
        NameAttribute::Extension(value) => value.to_string(),
        other => format!(r"\{:?}", other),
    }
}

// async-imap hands back pre-parsed FETCH attributes; re-render the canonical
// metadata line so the archive decoder stays the single parse authority for
// everything the engine consumes.
fn render_metadata_line(fetch: &Fetch) -> RustArchiverResult<String> {
    let uid = fetch.uid.ok_or_else(|| {
        raise_error!(
            "FETCH response without a UID attribute".into(),
            ErrorCode::FetchParseFailed
        )
    })?;
    let internal_date = fetch.internal_date().ok_or_else(|| {
        raise_error!(
            format!("FETCH response for UID {} without INTERNALDATE", uid),
            ErrorCode::FetchParseFailed
        )
    })?;
    Ok(format!(
        "{} (UID {} INTERNALDATE \"{}\")",
        fetch.message,
        uid,
        internal_date.format("%d-%b-%Y %H:%M:%S %z")
    ))
}
