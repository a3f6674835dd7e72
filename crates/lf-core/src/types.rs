//! Core type definitions for ListForge

use std::fmt;

// =============================================================================
// Removal Reasons
// =============================================================================

/// Why an entry was dropped from the canonical set.
///
/// When several predicates hold, the reason reported is the first one in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RemovalReason {
    /// Contains, or is contained in, a whitelist string.
    Whitelisted,
    /// Contains a banned keyword.
    Keyword,
    /// Covered by another suffix rule in the same set.
    Subsumed,
}

impl RemovalReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whitelisted => "whitelisted",
            Self::Keyword => "keyword",
            Self::Subsumed => "subsumed",
        }
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(RemovalReason::Whitelisted.to_string(), "whitelisted");
        assert_eq!(RemovalReason::Keyword.to_string(), "keyword");
        assert_eq!(RemovalReason::Subsumed.to_string(), "subsumed");
    }

    #[test]
    fn test_reason_order_follows_evaluation_order() {
        assert!(RemovalReason::Whitelisted < RemovalReason::Keyword);
        assert!(RemovalReason::Keyword < RemovalReason::Subsumed);
    }
}
