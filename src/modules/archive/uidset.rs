// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, RustArchiverResult};
use crate::raise_error;
use std::fmt::Write;

/// Encodes a strictly ascending sequence of UIDs into the compact IMAP
/// sequence-set form: maximal runs of consecutive identifiers become
/// `first:last`, singletons stay bare, runs are comma-joined.
/// `[1,2,3,5,7,8,9]` encodes as `"1:3,5,7:9"`.
///
/// Sorting and deduplication are the caller's responsibility; this function
/// never reorders. An empty input is rejected instead of producing an empty
/// set string the server would misread.
pub fn compress(uids: &[u32]) -> RustArchiverResult<String> {
    if uids.is_empty() {
        return Err(raise_error!(
            "cannot encode an empty UID set".into(),
            ErrorCode::InvalidParameter
        ));
    }
    debug_assert!(
        uids.windows(2).all(|pair| pair[0] < pair[1]),
        "UID set must be strictly ascending"
    );

    let mut encoded = String::new();
    let mut start = uids[0];
    let mut end = uids[0];

    for &uid in &uids[1..] {
        if uid == end + 1 {
            end = uid;
            continue;
        }
        push_run(&mut encoded, start, end);
        start = uid;
        end = uid;
    }
    push_run(&mut encoded, start, end);

    Ok(encoded)
}

fn push_run(encoded: &mut String, start: u32, end: u32) {
    if !encoded.is_empty() {
        encoded.push(',');
    }
    if start == end {
        let _ = write!(encoded, "{}", start);
    } else {
        let _ = write!(encoded, "{}:{}", start, end);
    }
}
