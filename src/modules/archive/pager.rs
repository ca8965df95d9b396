// Copyright © 2025 rustarchiver.dev
// Licensed under RustArchiver License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, RustArchiverResult};
use crate::raise_error;

/// Splits `items` into contiguous windows of at most `batch_size` elements.
/// Windows cover the input exactly once in original order; the last window
/// may be shorter.
pub fn pages<T>(
    items: &[T],
    batch_size: usize,
) -> RustArchiverResult<std::slice::Chunks<'_, T>> {
    if batch_size == 0 {
        return Err(raise_error!(
            "'batch_size' must be greater than 0.".into(),
            ErrorCode::InvalidParameter
        ));
    }
    Ok(items.chunks(batch_size))
}

#[cfg(test)]
mod tests {
    use super::pages;
    use crate::modules::error::code::ErrorCode;

    #[test]
    fn windows_cover_input_in_order_without_gaps() {
        let items: Vec<u32> = (1..=120).collect();
        let windows: Vec<&[u32]> = pages(&items, 50).unwrap().collect();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].len(), 50);
        assert_eq!(windows[1].len(), 50);
        assert_eq!(windows[2].len(), 20);

        let rejoined: Vec<u32> = windows.concat();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn short_input_yields_a_single_window() {
        let items = [1, 2, 3];
        let windows: Vec<&[i32]> = pages(&items, 50).unwrap().collect();
        assert_eq!(windows, vec![&items[..]]);
    }

    #[test]
    fn empty_input_yields_no_windows() {
        let items: [u32; 0] = [];
        assert_eq!(pages(&items, 50).unwrap().count(), 0);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let items = [1, 2, 3];
        let err = pages(&items, 0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidParameter);
    }
}
