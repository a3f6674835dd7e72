//! Whitelist Index
//!
//! An entry is whitelisted when it contains a whitelist string, or a
//! whitelist string contains it. Containment is raw substring containment in
//! both directions and is not anchored to label boundaries, so a short
//! whitelist string such as `t.co` also matches `bigt.com`.
//!
//! Both directions are answered without pairwise scanning:
//!
//! - forward (`entry ⊇ w`): a [`KeywordFilter`] over the whitelist
//! - reverse (`w ⊇ entry`): every substring of every whitelist string is
//!   looked up in the snapshot set once. Whitelist strings are few and short,
//!   so this costs `Σ|w|²` lookups and nothing per snapshot entry.

use std::collections::HashSet;

use crate::domain::DomainSet;
use crate::keyword::KeywordFilter;

/// Symmetric-containment whitelist predicate over a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct WhitelistIndex {
    forward: KeywordFilter,
    /// Snapshot entries that occur inside some whitelist string.
    contained: HashSet<String>,
}

impl WhitelistIndex {
    /// Build the index for `whitelist` against the entries of `snapshot`.
    ///
    /// Only snapshot entries can be answered in the reverse direction; see
    /// [`WhitelistIndex::covers`].
    pub fn build<W, S>(whitelist: W, snapshot: &DomainSet) -> Self
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let whitelist: Vec<S> = whitelist.into_iter().collect();
        let strings: Vec<&str> = whitelist.iter().map(|w| w.as_ref()).collect();
        let forward = KeywordFilter::new(&strings);
        let mut contained = HashSet::new();

        if !snapshot.is_empty() {
            for w in &strings {
                for_each_substring(w, |sub| {
                    if !contained.contains(sub) && snapshot.contains(sub) {
                        contained.insert(sub.to_string());
                    }
                });
            }
        }

        log::debug!(
            "whitelist index: {} strings, {} entries inside a whitelist string",
            forward.len(),
            contained.len()
        );

        Self { forward, contained }
    }

    /// True if `entry` contains a whitelist string or, for entries of the
    /// snapshot the index was built from, is contained in one.
    #[inline]
    pub fn covers(&self, entry: &str) -> bool {
        self.forward.contains_any(entry) || self.contained.contains(entry)
    }

    /// The whitelist string found inside `entry`, if any.
    pub fn forward_match(&self, entry: &str) -> Option<&str> {
        self.forward.first_match(entry)
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Call `f` with every non-empty substring of `text` cut at char boundaries.
fn for_each_substring<F>(text: &str, mut f: F)
where
    F: FnMut(&str),
{
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    for (n, &start) in bounds.iter().enumerate() {
        for &end in &bounds[n + 1..] {
            f(&text[start..end]);
        }
    }
}
