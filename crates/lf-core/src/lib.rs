//! ListForge Core Library
//!
//! This crate provides the in-memory indices used to reduce a merged domain
//! list to its canonical, non-redundant form.
//!
//! # Architecture
//!
//! All indices are built once from immutable inputs and are read-only
//! afterwards, so a single index can be shared by reference across shard
//! workers. Nothing in this crate performs I/O or keeps global state.
//!
//! # Modules
//!
//! - `automaton`: Aho-Corasick trie over an arbitrary key alphabet
//! - `keyword`: "does this text contain any keyword" filter
//! - `whitelist`: symmetric-containment whitelist predicate
//! - `suffix`: suffix-rule subsumption index over reversed labels
//! - `domain`: domain entry classification (exact vs. suffix form)
//! - `hash`: stable hashing for shard assignment
//! - `types`: Shared type definitions

pub mod automaton;
pub mod domain;
pub mod hash;
pub mod keyword;
pub mod suffix;
pub mod types;
pub mod whitelist;

// Re-export commonly used types
pub use automaton::{Automaton, NodeId, PatternId};
pub use domain::{DomainSet, EntryKind};
pub use hash::{hash_entry, shard_for};
pub use keyword::KeywordFilter;
pub use suffix::SuffixIndex;
pub use types::RemovalReason;
pub use whitelist::WhitelistIndex;
