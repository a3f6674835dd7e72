use thiserror::Error;

/// Failure of a reconciliation pass. A failed pass has no usable partial
/// result.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("shard count must be at least 1")]
    InvalidShardCount,

    #[error("failed to spawn worker for shard {shard}: {source}")]
    WorkerSpawn {
        shard: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for shard {shard} panicked")]
    WorkerPanicked { shard: usize },
}
