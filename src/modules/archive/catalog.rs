// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::archive::MailboxClient;
use crate::modules::error::RustArchiverResult;
use std::collections::HashSet;
use tracing::{debug, info};

const NO_SELECT: &str = "\\Noselect";

/// The set of archive mailboxes known to exist on the server.
///
/// Seeded once per engine run from a LIST of the archive root and append-only
/// afterwards: names are registered only after the server confirmed their
/// creation, and never removed.
#[derive(Debug, Default)]
pub struct MailboxCatalog {
    known: HashSet<String>,
}

impl MailboxCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog with every selectable mailbox matching `pattern`.
    /// Non-selectable entries (`\Noselect`) can never hold messages and are
    /// permanently excluded from the archive-target set.
    pub async fn load<C: MailboxClient>(
        &mut self,
        client: &mut C,
        pattern: &str,
    ) -> RustArchiverResult<()> {
        let entries = client.list_mailboxes(pattern).await?;
        for entry in entries {
            if entry
                .attributes
                .iter()
                .any(|attribute| attribute.eq_ignore_ascii_case(NO_SELECT))
            {
                continue;
            }
            self.known.insert(strip_quotes(&entry.name).to_string());
        }
        debug!("catalog seeded with {} archive mailboxes", self.known.len());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn register(&mut self, name: &str) {
        self.known.insert(name.to_string());
    }

    /// Creates the mailbox through the client unless it is already known.
    /// A failed create propagates without registering the name.
    pub async fn ensure_exists<C: MailboxClient>(
        &mut self,
        client: &mut C,
        name: &str,
    ) -> RustArchiverResult<()> {
        if self.contains(name) {
            return Ok(());
        }
        client.create_mailbox(name).await?;
        info!("created archive mailbox {:?}", name);
        self.register(name);
        Ok(())
    }
}

// LIST responses quote names containing spaces; the catalog tracks the bare
// name.
fn strip_quotes(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(name)
}
