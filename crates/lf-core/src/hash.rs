//! Hash functions for ListForge
//!
//! Uses xxHash64 with a fixed seed so that shard assignment is stable across
//! runs and platforms.

use std::hash::Hasher;

use twox_hash::XxHash64;

const SHARD_SEED: u64 = 0x9e37_79b9_7f4a_7c15; // Golden ratio

/// Hash an entry's raw bytes.
#[inline]
pub fn hash_entry(entry: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(SHARD_SEED);
    hasher.write(entry.as_bytes());
    hasher.finish()
}

/// Shard index in `0..shards` for an entry. `shards` must be non-zero.
#[inline]
pub fn shard_for(entry: &str, shards: usize) -> usize {
    debug_assert!(shards > 0);
    (hash_entry(entry) % shards as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_entry_consistent() {
        assert_eq!(hash_entry("example.com"), hash_entry("example.com"));
    }

    #[test]
    fn test_hash_entry_different_strings() {
        assert_ne!(hash_entry("example.com"), hash_entry("example.org"));
        assert_ne!(hash_entry("example.com"), hash_entry(".example.com"));
    }

    #[test]
    fn test_shard_for_in_range() {
        for shards in 1..=16 {
            for entry in ["a.com", ".b.com", "c.example.org", ""] {
                assert!(shard_for(entry, shards) < shards);
            }
        }
    }

    #[test]
    fn test_single_shard() {
        assert_eq!(shard_for("anything.com", 1), 0);
    }

    #[test]
    fn test_shards_spread() {
        let mut counts = [0usize; 4];
        for i in 0..1000 {
            counts[shard_for(&format!("host{i}.example.com"), 4)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 100), "uneven spread: {:?}", counts);
    }
}
