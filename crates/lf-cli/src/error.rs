use std::io;
use std::path::PathBuf;

use lf_compiler::ReconcileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No input files specified")]
    NoInputs,

    #[error("Malformed entry: {0:?}")]
    MalformedEntry(String),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),
}
