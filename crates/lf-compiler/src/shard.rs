//! Shard Coordinator
//!
//! Fans the per-entry removal decision out over disjoint shards of a frozen
//! snapshot. Workers share the [`Reconciler`] by reference and only read it;
//! the coordinator applies the union of their removal sets after every worker
//! has finished. Any worker failure fails the whole pass.

use std::collections::HashMap;
use std::thread;

use lf_core::domain::DomainSet;
use lf_core::hash::shard_for;
use lf_core::RemovalReason;

use crate::error::ReconcileError;
use crate::reconciler::{apply_removals, evaluate, ReconcileOptions, ReconcileStats, Reconciler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardCoordinator {
    shards: usize,
}

impl ShardCoordinator {
    pub fn new(shards: usize) -> Result<Self, ReconcileError> {
        if shards == 0 {
            return Err(ReconcileError::InvalidShardCount);
        }
        Ok(Self { shards })
    }

    pub fn shards(&self) -> usize {
        self.shards
    }

    /// Split `snapshot` into `shards` disjoint partitions by entry hash.
    pub fn partition<'a>(&self, snapshot: &'a DomainSet) -> Vec<Vec<&'a str>> {
        let mut partitions = vec![Vec::new(); self.shards];
        for entry in snapshot {
            partitions[shard_for(entry, self.shards)].push(entry.as_str());
        }
        partitions
    }

    /// Reduce `domains` in place using one worker thread per shard.
    ///
    /// On error `domains` is left untouched.
    pub fn run(&self, domains: &mut DomainSet, options: &ReconcileOptions) -> Result<ReconcileStats, ReconcileError> {
        let before = domains.len();
        let removals = {
            let reconciler = Reconciler::new(domains, options);
            let partitions = self.partition(domains);
            evaluate_partitions(&reconciler, &partitions)?
        };
        Ok(apply_removals(domains, removals, before))
    }
}

/// Removal decisions for caller-supplied partitions of the reconciler's
/// snapshot. Partitions may have any sizes; overlapping entries are harmless.
pub fn evaluate_partitions(
    reconciler: &Reconciler,
    partitions: &[Vec<&str>],
) -> Result<HashMap<String, RemovalReason>, ReconcileError> {
    let results = fan_out(partitions, |entries| evaluate(reconciler, entries.iter().copied()))?;

    let mut removals = HashMap::new();
    for shard_removals in results {
        removals.extend(shard_removals);
    }
    Ok(removals)
}

/// Run `worker` on every partition in its own scoped thread and collect the
/// results in partition order. Every spawned worker is joined before this
/// returns, including on error.
fn fan_out<T, F>(partitions: &[Vec<&str>], worker: F) -> Result<Vec<T>, ReconcileError>
where
    T: Send,
    F: Fn(&[&str]) -> T + Sync,
{
    let worker = &worker;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(partitions.len());
        let mut spawn_error = None;

        for (shard, entries) in partitions.iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("lf-shard-{shard}"))
                .spawn_scoped(scope, move || worker(entries.as_slice()));
            match spawned {
                Ok(handle) => handles.push((shard, entries.len(), handle)),
                Err(source) => {
                    spawn_error = Some(ReconcileError::WorkerSpawn { shard, source });
                    break;
                }
            }
        }

        let joined: Vec<_> = handles
            .into_iter()
            .map(|(shard, len, handle)| (shard, len, handle.join()))
            .collect();

        if let Some(err) = spawn_error {
            return Err(err);
        }

        let mut results = Vec::with_capacity(joined.len());
        for (shard, len, outcome) in joined {
            match outcome {
                Ok(result) => {
                    log::debug!("shard {} finished ({} entries)", shard, len);
                    results.push(result);
                }
                Err(_) => return Err(ReconcileError::WorkerPanicked { shard }),
            }
        }
        Ok(results)
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::reconciler::reconcile;

    fn options(whitelist: &[&str], keywords: &[&str]) -> ReconcileOptions {
        ReconcileOptions {
            whitelist: whitelist.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn generated_set(rng: &mut StdRng, count: usize) -> DomainSet {
        let labels = ["ads", "cdn", "track", "img", "api", "static", "m", "www", "t", "co"];
        let tlds = ["com", "net", "org", "co"];
        let mut domains = DomainSet::new();
        while domains.len() < count {
            let depth = rng.gen_range(1..=3);
            let mut name: Vec<String> = (0..depth)
                .map(|_| format!("{}{}", labels[rng.gen_range(0..labels.len())], rng.gen_range(0..40)))
                .collect();
            name.push(tlds[rng.gen_range(0..tlds.len())].to_string());
            let mut entry = name.join(".");
            if rng.gen_bool(0.2) {
                entry.insert(0, '.');
            }
            domains.insert(entry);
        }
        domains
    }

    #[test]
    fn rejects_zero_shards() {
        assert!(matches!(
            ShardCoordinator::new(0),
            Err(ReconcileError::InvalidShardCount)
        ));
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        let domains = generated_set(&mut rng, 500);
        let coordinator = ShardCoordinator::new(8).unwrap();
        let partitions = coordinator.partition(&domains);
        assert_eq!(partitions.len(), 8);

        let total: usize = partitions.iter().map(Vec::len).sum();
        assert_eq!(total, domains.len());
        let union: DomainSet = partitions.iter().flatten().map(|s| s.to_string()).collect();
        assert_eq!(union, domains);
    }

    #[test]
    fn literal_example_sharded() {
        let mut domains: DomainSet = ["ads.example.com", ".example.com", "safe.org"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stats = ShardCoordinator::new(3)
            .unwrap()
            .run(&mut domains, &ReconcileOptions::default())
            .unwrap();
        assert_eq!(domains.len(), 2);
        assert!(domains.contains(".example.com"));
        assert!(domains.contains("safe.org"));
        assert_eq!(stats.subsumed, 1);
    }

    #[test]
    fn sharded_matches_single_pass() {
        let mut rng = StdRng::seed_from_u64(42);
        let domains = generated_set(&mut rng, 10_000);
        let opts = options(&["static1.", "m7.com"], &["track3", "api12"]);

        let mut single = domains.clone();
        let single_stats = reconcile(&mut single, &opts);

        let mut sharded = domains.clone();
        let sharded_stats = ShardCoordinator::new(8).unwrap().run(&mut sharded, &opts).unwrap();

        assert_eq!(single, sharded);
        assert_eq!(single_stats, sharded_stats);
        assert!(single_stats.removed() > 0);
    }

    #[test]
    fn arbitrary_partitions_match_single_pass() {
        let mut rng = StdRng::seed_from_u64(1234);
        let domains = generated_set(&mut rng, 10_000);
        let opts = options(&["cdn2"], &["ads1"]);

        let mut single = domains.clone();
        reconcile(&mut single, &opts);

        // 8 shards of random sizes, cut from an arbitrary ordering.
        let entries: Vec<&str> = domains.iter().map(String::as_str).collect();
        let mut cuts: Vec<usize> = (0..7).map(|_| rng.gen_range(0..=entries.len())).collect();
        cuts.push(0);
        cuts.push(entries.len());
        cuts.sort_unstable();
        let partitions: Vec<Vec<&str>> = cuts.windows(2).map(|w| entries[w[0]..w[1]].to_vec()).collect();
        assert_eq!(partitions.len(), 8);

        let reconciler = Reconciler::new(&domains, &opts);
        let removals = evaluate_partitions(&reconciler, &partitions).unwrap();
        let mut sharded = domains.clone();
        for entry in removals.keys() {
            sharded.remove(entry);
        }

        assert_eq!(single, sharded);
    }

    #[test]
    fn more_shards_than_entries() {
        let mut domains: DomainSet = [".a.com", "b.a.com"].iter().map(|s| s.to_string()).collect();
        ShardCoordinator::new(16)
            .unwrap()
            .run(&mut domains, &ReconcileOptions::default())
            .unwrap();
        assert_eq!(domains.len(), 1);
        assert!(domains.contains(".a.com"));
    }

    #[test]
    fn worker_panic_fails_the_pass() {
        let partitions = vec![vec!["a.com"], vec!["boom.com"], vec!["c.com"]];
        let result = fan_out(&partitions, |entries| {
            if entries.contains(&"boom.com") {
                panic!("worker failure");
            }
            entries.len()
        });
        assert!(matches!(result, Err(ReconcileError::WorkerPanicked { shard: 1 })));
    }

    #[test]
    fn fan_out_keeps_partition_order() {
        let partitions = vec![vec!["a"], vec!["b", "c"], vec![]];
        let sizes = fan_out(&partitions, |entries| entries.len()).unwrap();
        assert_eq!(sizes, vec![1, 2, 0]);
    }
}
