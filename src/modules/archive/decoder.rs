// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, RustArchiverResult};
use crate::raise_error;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::LazyLock;

// Matches one `(UID INTERNALDATE)` FETCH response line, e.g.
// `3 (UID 17 INTERNALDATE "12-Feb-2023 09:30:00 +0100")`.
// RFC 3501 allows a space-padded day of month and either offset sign.
static METADATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\d+ \(UID (\d+) INTERNALDATE " ?(\d{1,2}-[A-Za-z]{3}-\d{4} \d{2}:\d{2}:\d{2} [+-]\d{4})""#,
    )
    .unwrap()
});

const INTERNALDATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S %z";

/// The per-message attributes the archiver fetches.
#[derive(Debug, Clone)]
pub struct MessageMetadata {
    pub uid: u32,
    pub internal_date: DateTime<FixedOffset>,
}

/// Parses one raw metadata line. A line that does not match the expected
/// shape is an error, never silently skipped.
pub fn parse_metadata_line(line: &str) -> RustArchiverResult<MessageMetadata> {
    let captures = METADATA_LINE.captures(line).ok_or_else(|| {
        raise_error!(
            format!("unparseable FETCH response line: {:?}", line),
            ErrorCode::FetchParseFailed
        )
    })?;

    let uid = captures[1].parse::<u32>().map_err(|e| {
        raise_error!(
            format!("invalid UID in FETCH response line {:?}: {}", line, e),
            ErrorCode::FetchParseFailed
        )
    })?;

    let internal_date =
        DateTime::parse_from_str(&captures[2], INTERNALDATE_FORMAT).map_err(|e| {
            raise_error!(
                format!("invalid INTERNALDATE in FETCH response line {:?}: {}", line, e),
                ErrorCode::FetchParseFailed
            )
        })?;

    Ok(MessageMetadata { uid, internal_date })
}
