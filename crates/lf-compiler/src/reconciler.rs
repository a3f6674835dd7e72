use std::collections::HashMap;

use lf_core::domain::DomainSet;
use lf_core::{KeywordFilter, RemovalReason, SuffixIndex, WhitelistIndex};

/// Static configuration of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Entries containing one of these strings, or contained in one, are
    /// removed.
    pub whitelist: Vec<String>,
    /// Strings that may not appear anywhere in a retained entry.
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub before: usize,
    pub after: usize,
    pub whitelisted: usize,
    pub keyword_matched: usize,
    pub subsumed: usize,
}

impl ReconcileStats {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }

    fn record(&mut self, reason: RemovalReason) {
        match reason {
            RemovalReason::Whitelisted => self.whitelisted += 1,
            RemovalReason::Keyword => self.keyword_matched += 1,
            RemovalReason::Subsumed => self.subsumed += 1,
        }
    }
}

/// Why a single entry would be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal<'a> {
    pub reason: RemovalReason,
    /// The keyword or whitelist string found inside the entry, when the
    /// predicate that fired has one to report.
    pub matched: Option<&'a str>,
}

/// Read-only indices for one pass, built from a frozen snapshot of the set.
///
/// Every decision is a pure function of the entry and these indices, so the
/// same `Reconciler` can be shared by any number of shard workers.
#[derive(Debug, Clone)]
pub struct Reconciler {
    whitelist: WhitelistIndex,
    keywords: KeywordFilter,
    suffixes: SuffixIndex,
}

impl Reconciler {
    pub fn new(snapshot: &DomainSet, options: &ReconcileOptions) -> Self {
        Self {
            whitelist: WhitelistIndex::build(&options.whitelist, snapshot),
            keywords: KeywordFilter::new(&options.keywords),
            suffixes: SuffixIndex::from_suffix_entries(snapshot.iter().map(String::as_str)),
        }
    }

    /// First predicate removing `entry`, in the order whitelist, keyword,
    /// suffix subsumption. `None` means the entry is retained.
    ///
    /// Whitelist and keyword removal are independent predicates: a whitelisted
    /// entry does not survive a keyword hit.
    #[inline]
    pub fn removal_reason(&self, entry: &str) -> Option<RemovalReason> {
        if self.whitelist.covers(entry) {
            Some(RemovalReason::Whitelisted)
        } else if self.keywords.contains_any(entry) {
            Some(RemovalReason::Keyword)
        } else if self.suffixes.is_covered(entry) {
            Some(RemovalReason::Subsumed)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_redundant(&self, entry: &str) -> bool {
        self.removal_reason(entry).is_some()
    }

    /// Like [`Reconciler::removal_reason`], with the matched string attached.
    pub fn explain(&self, entry: &str) -> Option<Removal<'_>> {
        let reason = self.removal_reason(entry)?;
        let matched = match reason {
            RemovalReason::Whitelisted => self.whitelist.forward_match(entry),
            RemovalReason::Keyword => self.keywords.first_match(entry),
            RemovalReason::Subsumed => None,
        };
        Some(Removal { reason, matched })
    }
}

/// Reduce `domains` in place to its canonical form on the calling thread.
pub fn reconcile(domains: &mut DomainSet, options: &ReconcileOptions) -> ReconcileStats {
    let before = domains.len();
    let removals = {
        let reconciler = Reconciler::new(domains, options);
        evaluate(&reconciler, domains.iter().map(String::as_str))
    };
    apply_removals(domains, removals, before)
}

/// Removal decisions for `entries` against a shared snapshot.
pub(crate) fn evaluate<'a, I>(reconciler: &Reconciler, entries: I) -> Vec<(String, RemovalReason)>
where
    I: IntoIterator<Item = &'a str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            reconciler
                .removal_reason(entry)
                .map(|reason| (entry.to_string(), reason))
        })
        .collect()
}

/// Subtract the union of all removal decisions from `domains`.
pub(crate) fn apply_removals<I>(domains: &mut DomainSet, removals: I, before: usize) -> ReconcileStats
where
    I: IntoIterator<Item = (String, RemovalReason)>,
{
    let removals: HashMap<String, RemovalReason> = removals.into_iter().collect();
    let mut stats = ReconcileStats {
        before,
        ..ReconcileStats::default()
    };

    for (entry, reason) in removals {
        if domains.remove(&entry) {
            stats.record(reason);
        }
    }

    stats.after = domains.len();
    log::info!(
        "reconciled {} -> {} entries (whitelisted {}, keyword {}, subsumed {})",
        stats.before,
        stats.after,
        stats.whitelisted,
        stats.keyword_matched,
        stats.subsumed
    );
    stats
}
