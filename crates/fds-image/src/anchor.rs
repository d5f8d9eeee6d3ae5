//! Anchor based patching of opaque binary templates
//!
//! The template's code already references its files by name and load address.
//! Instead of tracking template offsets, patch locations are found by
//! searching for a literal marker (usually a file name).
//!
//! CAUTION: the first match is used.  Template markers MUST be unique.

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::errors::AnchorError;

fn marker_string(marker: &[u8]) -> String {
    String::from_utf8_lossy(marker).into_owned()
}

/// Returns the offset of the first occurrence of `marker` in `buffer`.
pub fn find_anchor(buffer: &[u8], marker: &[u8]) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    buffer.windows(marker.len()).position(|w| w == marker)
}

fn find_anchor_or_err(buffer: &[u8], marker: &[u8]) -> Result<usize, AnchorError> {
    find_anchor(buffer, marker).ok_or_else(|| AnchorError::NotFound(marker_string(marker)))
}

/// Truncates `buffer` to `keep_after` bytes past the start of `marker`.
///
/// Returns the anchor offset.
pub fn truncate_at(
    buffer: &mut Vec<u8>,
    marker: &[u8],
    keep_after: usize,
) -> Result<usize, AnchorError> {
    let offset = find_anchor_or_err(buffer, marker)?;
    let end = offset + keep_after;

    if end > buffer.len() {
        return Err(AnchorError::OutOfBounds(offset, end, buffer.len()));
    }

    buffer.truncate(end);

    Ok(offset)
}

/// Overwrites `data.len()` bytes, starting `header_skip` bytes after the start of `marker`.
///
/// Returns the offset of the patched data.
pub fn patch_at(
    buffer: &mut [u8],
    marker: &[u8],
    header_skip: usize,
    data: &[u8],
) -> Result<usize, AnchorError> {
    let offset = find_anchor_or_err(buffer, marker)?;
    let start = offset + header_skip;
    let end = start + data.len();

    match buffer.get_mut(start..end) {
        Some(b) => {
            b.copy_from_slice(data);
            Ok(start)
        }
        None => Err(AnchorError::OutOfBounds(offset, end, buffer.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_anchor() {
        let buffer = b"..abcd..abcd";

        assert_eq!(find_anchor(buffer, b"abcd"), Some(2));
        assert_eq!(find_anchor(buffer, b"..a"), Some(0));
        assert_eq!(find_anchor(buffer, b"cd"), Some(4));
        assert_eq!(find_anchor(buffer, b"abce"), None);
        assert_eq!(find_anchor(buffer, b""), None);
        assert_eq!(find_anchor(b"ab", b"abcd"), None);
    }

    #[test]
    fn test_truncate_at() {
        let mut buffer = b"0123MARK45678".to_vec();

        assert_eq!(truncate_at(&mut buffer, b"MARK", 6), Ok(4));
        assert_eq!(buffer, b"0123MARK45");

        let mut buffer = b"0123MARK45678".to_vec();
        assert_eq!(truncate_at(&mut buffer, b"MARK", 0), Ok(4));
        assert_eq!(buffer, b"0123");
    }

    #[test]
    fn test_truncate_at_errors() {
        let mut buffer = b"0123MARK45678".to_vec();

        assert!(matches!(
            truncate_at(&mut buffer, b"NOPE", 0),
            Err(AnchorError::NotFound(_))
        ));
        assert!(matches!(
            truncate_at(&mut buffer, b"MARK", 10),
            Err(AnchorError::OutOfBounds(4, 14, 13))
        ));

        // buffer is unchanged
        assert_eq!(buffer, b"0123MARK45678");
    }

    #[test]
    fn test_patch_at_only_writes_patch_region() {
        let mut buffer = vec![0xaa; 64];
        buffer[20..24].copy_from_slice(b"TOC_");

        let data = [1, 2, 3, 4, 5];
        assert_eq!(patch_at(&mut buffer, b"TOC_", 6, &data), Ok(26));

        for (i, b) in buffer.iter().enumerate() {
            match i {
                20..=23 => (),
                26..=30 => assert_eq!(*b, data[i - 26]),
                _ => assert_eq!(*b, 0xaa, "byte {} modified", i),
            }
        }
    }

    #[test]
    fn test_patch_at_uses_first_match() {
        let mut buffer = b"AAMKBBMKCCCC".to_vec();

        assert_eq!(patch_at(&mut buffer, b"MK", 2, b"xy"), Ok(4));
        assert_eq!(buffer, b"AAMKxyMKCCCC");
    }

    #[test]
    fn test_patch_at_errors() {
        let mut buffer = b"0123MARK45678".to_vec();

        assert!(matches!(
            patch_at(&mut buffer, b"NOPE", 0, b"x"),
            Err(AnchorError::NotFound(_))
        ));
        assert!(matches!(
            patch_at(&mut buffer, b"MARK", 4, b"abcdef"),
            Err(AnchorError::OutOfBounds(4, 14, 13))
        ));

        assert_eq!(buffer, b"0123MARK45678");
    }
}
