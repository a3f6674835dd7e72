//! ListForge Domain List Compiler
//!
//! This crate reduces domain lists merged from many sources into a canonical
//! rule set.

pub mod error;
pub mod parser;
pub mod reconciler;
pub mod shard;

pub use error::ReconcileError;
pub use parser::{normalize_entry, parse_domain_list, parse_string_list, ParseStats};
pub use reconciler::{reconcile, ReconcileOptions, ReconcileStats, Reconciler, Removal};
pub use shard::ShardCoordinator;
