use lf_core::domain::{is_well_formed, suffix_body, SUFFIX_MARKER};

/// Counters for one parsed list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub entries: usize,
    pub comments: usize,
    pub malformed: usize,
}

/// Parse a line-oriented domain list.
///
/// Each non-blank, non-comment line is either a bare domain (`example.com`)
/// or a suffix rule (`.example.com`). Entries are lower-cased and a trailing
/// root dot is dropped. Malformed lines are skipped and counted, never fatal.
pub fn parse_domain_list(text: &str) -> (Vec<String>, ParseStats) {
    let mut entries = Vec::new();
    let mut stats = ParseStats::default();

    for raw_line in text.lines() {
        stats.lines += 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if is_comment_line(line) {
            stats.comments += 1;
            continue;
        }

        match normalize_entry(line) {
            Some(entry) => entries.push(entry),
            None => {
                stats.malformed += 1;
                log::warn!("skipping malformed entry on line {}: {:?}", stats.lines, line);
            }
        }
    }

    stats.entries = entries.len();
    (entries, stats)
}

/// Parse a plain string list (keywords, whitelist strings).
///
/// Lines are trimmed; blank and comment lines are dropped. No other
/// normalization happens, since keyword and whitelist matching is exact.
pub fn parse_string_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment_line(line))
        .map(str::to_string)
        .collect()
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('!')
}

/// Canonical form of a single list entry: lower-cased, trailing root dot
/// dropped. `None` if the entry is malformed.
pub fn normalize_entry(line: &str) -> Option<String> {
    let lowered = line.to_ascii_lowercase();
    let trimmed = lowered.strip_suffix('.').unwrap_or(lowered.as_str());

    let body = if trimmed.starts_with(SUFFIX_MARKER) {
        suffix_body(trimmed)?
    } else {
        trimmed
    };

    if !is_well_formed(body) || body.split('.').any(str::is_empty) {
        return None;
    }

    Some(trimmed.to_string())
}
