//! Domain entry classification
//!
//! An entry is either an exact domain (`example.com`) or a suffix rule
//! (`.example.com`, meaning the domain and every subdomain). Entries are
//! otherwise opaque strings: no case folding happens here.
//!
//! # Examples
//!
//! ```
//! use lf_core::domain::{classify, suffix_body, EntryKind};
//!
//! assert_eq!(classify(".example.com"), EntryKind::Suffix);
//! assert_eq!(classify("example.com"), EntryKind::Exact);
//! assert_eq!(suffix_body(".example.com"), Some("example.com"));
//! ```

use std::collections::HashSet;

/// Working set of entries, deduplicated by exact string equality.
pub type DomainSet = HashSet<String>;

/// Leading separator marking a suffix rule.
pub const SUFFIX_MARKER: char = '.';

/// Kind of a domain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Matches only the domain itself.
    Exact,
    /// Matches the domain and all of its subdomains.
    Suffix,
}

/// Bare domain of a suffix rule, or `None` if `entry` is not suffix-form.
///
/// A lone `.` or a doubled leading separator is not a valid rule and is
/// classified as an exact entry instead.
#[inline]
pub fn suffix_body(entry: &str) -> Option<&str> {
    let body = entry.strip_prefix(SUFFIX_MARKER)?;
    if body.is_empty() || body.starts_with(SUFFIX_MARKER) {
        return None;
    }
    Some(body)
}

#[inline]
pub fn classify(entry: &str) -> EntryKind {
    if suffix_body(entry).is_some() {
        EntryKind::Suffix
    } else {
        EntryKind::Exact
    }
}

/// Whether an entry is usable as a list line: non-empty and made only of
/// lowercase ASCII letters, digits, `.`, `-` and `_`.
pub fn is_well_formed(entry: &str) -> bool {
    !entry.is_empty()
        && entry
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'_')
}
