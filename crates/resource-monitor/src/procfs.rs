// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared parsing for `key:   <n> kB` style procfs files.
//!
//! Both `/proc/self/status` and `/proc/meminfo` use this layout.

use crate::MonitorError;
use std::path::Path;

/// Reads a procfs file, mapping a missing file to [`MonitorError::NotAvailable`].
pub(crate) fn read(path: &Path) -> Result<String, MonitorError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MonitorError::NotAvailable {
                path: path.display().to_string(),
            }
        } else {
            MonitorError::ReadError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })
}

/// Looks up each of `keys` (without the trailing colon) and returns their
/// values converted from kB to bytes, in the same order.
///
/// Missing keys come back as `None`; a present key with a malformed value
/// is an error.
pub(crate) fn kb_fields<const N: usize>(
    content: &str,
    keys: [&str; N],
    source_path: &Path,
) -> Result<[Option<u64>; N], MonitorError> {
    let mut found = [None; N];

    for line in content.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(slot) = keys.iter().position(|k| *k == name.trim()) else {
            continue;
        };

        let value = rest.split_whitespace().next().unwrap_or("");
        let kb = value.parse::<u64>().map_err(|_| MonitorError::ParseError {
            path: source_path.display().to_string(),
            detail: format!("{name}: expected integer kB value, got '{value}'"),
        })?;
        let bytes = kb.checked_mul(1024).ok_or_else(|| MonitorError::ParseError {
            path: source_path.display().to_string(),
            detail: format!("{name}: {kb} kB overflows a byte count"),
        })?;
        found[slot] = Some(bytes);

        if found.iter().all(Option::is_some) {
            break;
        }
    }

    Ok(found)
}

/// Turns a missing field into a parse error naming the field.
pub(crate) fn require(
    value: Option<u64>,
    key: &str,
    source_path: &Path,
) -> Result<u64, MonitorError> {
    value.ok_or_else(|| MonitorError::ParseError {
        path: source_path.display().to_string(),
        detail: format!("{key} not found"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_in_requested_order() {
        let content = "B:   20 kB\nA:\t10 kB\n";
        let [a, b] = kb_fields(content, ["A", "B"], Path::new("x")).unwrap();
        assert_eq!(a, Some(10 * 1024));
        assert_eq!(b, Some(20 * 1024));
    }

    #[test]
    fn test_missing_field_is_none() {
        let [a] = kb_fields("Other: 1 kB\n", ["A"], Path::new("x")).unwrap();
        assert!(a.is_none());
        assert!(matches!(
            require(a, "A", Path::new("x")),
            Err(MonitorError::ParseError { .. })
        ));
    }

    #[test]
    fn test_malformed_value() {
        let result = kb_fields("A: lots kB\n", ["A"], Path::new("x"));
        assert!(matches!(result, Err(MonitorError::ParseError { .. })));
    }

    #[test]
    fn test_oversized_value_is_parse_error() {
        let content = format!("A: {} kB\n", u64::MAX);
        let result = kb_fields(&content, ["A"], Path::new("x"));
        assert!(matches!(result, Err(MonitorError::ParseError { .. })));

        let largest = u64::MAX / 1024;
        let [a] = kb_fields(&format!("A: {largest} kB\n"), ["A"], Path::new("x")).unwrap();
        assert_eq!(a, Some(largest * 1024));
    }

    #[test]
    fn test_missing_file() {
        let result = read(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(MonitorError::NotAvailable { .. })));
    }
}
