use thiserror::Error;

/// Pool construction failed because a worker thread could not be spawned.
///
/// Construction is all-or-nothing: workers spawned before the failure are
/// shut down and joined before this error is returned.
#[derive(Debug, Error)]
#[error("failed to spawn worker thread: {0}")]
pub struct SpawnError(#[from] pub(crate) std::io::Error);

/// Failure of a single result-bearing task, delivered through its
/// [`TaskFuture`](crate::TaskFuture).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task function panicked while running on a worker thread. The
    /// worker survives and keeps serving the queue.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was still queued when the pool shut down and was never
    /// executed.
    #[error("task abandoned before execution")]
    Abandoned,
}

/// Failure of one chunk during parallel aggregation.
///
/// `chunk` is the zero-based, left-to-right position of the failing chunk;
/// aggregation awaits futures in submission order, so this is always the
/// first failing chunk reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chunk {chunk} failed: {source}")]
pub struct ChunkError {
    pub chunk: usize,
    #[source]
    pub source: TaskError,
}
