use std::fs;
use std::path::Path;

use lf_compiler::ReconcileOptions;
use serde::Deserialize;

use crate::error::CliError;

/// Reconcile configuration file.
///
/// ```json
/// {
///   "whitelist": ["apple.com"],
///   "keywords": ["tracker"],
///   "shards": 8
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    pub whitelist: Vec<String>,
    pub keywords: Vec<String>,
    pub shards: Option<usize>,
}

impl ReconcileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or the empty config when no file is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Append extra whitelist strings and keywords from the command line.
    pub fn extend(&mut self, whitelist: Vec<String>, keywords: Vec<String>) {
        self.whitelist.extend(whitelist);
        self.keywords.extend(keywords);
    }

    pub fn to_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            whitelist: self.whitelist.clone(),
            keywords: self.keywords.clone(),
        }
    }
}
