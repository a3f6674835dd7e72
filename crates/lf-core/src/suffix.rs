//! Suffix Subsumption Index
//!
//! Decides whether a domain entry is covered by another suffix rule of the
//! same set without comparing entries pairwise.
//!
//! Every suffix rule `.a.b.c` is stored as the label path `c -> b -> a` in a
//! label trie. A candidate is covered when walking its reversed labels hits a
//! rule node while labels remain (`x.a.b.c`, `.x.a.b.c`), or when it exhausts
//! its labels exactly on a rule node and is itself an exact entry (`a.b.c`
//! against `.a.b.c`). A suffix rule never covers itself.
//!
//! Matching is label-aligned: `.example.com` covers `ads.example.com` but not
//! `notexample.com`.

use crate::automaton::{Automaton, NodeId};
use crate::domain::suffix_body;

/// Label trie of suffix rules.
#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    trie: Automaton<Box<str>>,
}

impl SuffixIndex {
    /// Index every suffix-form entry of `entries`; exact entries are skipped.
    pub fn from_suffix_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut trie = Automaton::new();
        for entry in entries {
            if let Some(body) = suffix_body(entry) {
                trie.insert(body.rsplit('.').map(Box::from));
            }
        }

        log::debug!(
            "suffix index: {} rules, {} nodes",
            trie.pattern_count(),
            trie.node_count()
        );

        Self { trie }
    }

    /// True if some suffix rule other than `entry` itself covers `entry`.
    pub fn is_covered(&self, entry: &str) -> bool {
        let (body, entry_is_rule) = match suffix_body(entry) {
            Some(body) => (body, true),
            None => (entry, false),
        };

        let mut node = NodeId::ROOT;
        let mut labels = body.rsplit('.').peekable();

        while let Some(label) = labels.next() {
            node = match self.trie.child(node, label) {
                Some(next) => next,
                None => return false,
            };

            if self.trie.node(node).is_terminal() {
                if labels.peek().is_some() {
                    return true;
                }
                // Same labels: `a.b` is covered by `.a.b`, `.a.b` is itself.
                return !entry_is_rule;
            }
        }

        false
    }

    /// Number of distinct suffix rules indexed.
    pub fn len(&self) -> usize {
        self.trie.pattern_count()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}
