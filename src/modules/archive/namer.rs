// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

/// Derives archive mailbox names of the form `root.year.source`, folding the
/// configured inbox segment out of the result.
#[derive(Debug, Clone)]
pub struct ArchiveNamer {
    root: String,
    inbox_segment: String,
}

impl ArchiveNamer {
    pub fn new(root: impl Into<String>, inbox_segment: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            inbox_segment: inbox_segment.into(),
        }
    }

    /// Builds `root.year.source`, then removes every occurrence of
    /// `".{inbox_segment}"`. The removal is purely textual, not
    /// hierarchy-aware: `Archives.2023.INBOX` folds to `Archives.2023` and
    /// `Archives.2023.INBOX.Foo` folds to `Archives.2023.Foo`.
    pub fn name(&self, year: i32, source_mailbox: &str) -> String {
        let name = format!("{}.{}.{}", self.root, year, source_mailbox);
        name.replace(&format!(".{}", self.inbox_segment), "")
    }
}
