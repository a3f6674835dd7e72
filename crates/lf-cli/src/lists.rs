use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use lf_compiler::{parse_domain_list, parse_string_list, ParseStats};
use lf_core::domain::DomainSet;

use crate::error::CliError;

/// Union of several parsed domain lists.
#[derive(Debug, Default)]
pub struct LoadedLists {
    pub domains: DomainSet,
    pub files: usize,
    pub lines: usize,
    pub entries: usize,
    pub malformed: usize,
}

impl LoadedLists {
    fn add(&mut self, entries: Vec<String>, stats: ParseStats) {
        self.files += 1;
        self.lines += stats.lines;
        self.entries += stats.entries;
        self.malformed += stats.malformed;
        self.domains.extend(entries);
    }
}

pub fn load_domain_lists(inputs: &[String]) -> Result<LoadedLists, CliError> {
    if inputs.is_empty() {
        return Err(CliError::NoInputs);
    }

    let mut loaded = LoadedLists::default();
    for (list_id, path) in inputs.iter().enumerate() {
        let content = read_text(Path::new(path))?;
        let (entries, stats) = parse_domain_list(&content);

        log::debug!(
            "[{}] {} - {} lines, {} entries, {} malformed",
            list_id,
            Path::new(path).file_name().unwrap_or_default().to_string_lossy(),
            stats.lines,
            stats.entries,
            stats.malformed
        );

        loaded.add(entries, stats);
    }

    Ok(loaded)
}

/// Read and concatenate plain string lists (keywords, whitelist strings).
pub fn load_string_lists(paths: &[String]) -> Result<Vec<String>, CliError> {
    let mut strings = Vec::new();
    for path in paths {
        strings.extend(parse_string_list(&read_text(Path::new(path))?));
    }
    Ok(strings)
}

/// Render the canonical set sorted, one entry per line.
pub fn render_domain_list(domains: &DomainSet) -> String {
    let sorted: BTreeSet<&str> = domains.iter().map(String::as_str).collect();
    let mut out = String::with_capacity(domains.iter().map(|d| d.len() + 1).sum());
    for entry in sorted {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Write `contents` to `path` unless the file already holds exactly that.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool, CliError> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
