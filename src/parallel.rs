//! Data-parallel execution helpers built on [`ResultPool`].
//!
//! Both strategies split a shared collection into contiguous chunks, submit
//! one result-bearing task per chunk and aggregate the partial results by
//! awaiting the futures in submission order. Awaiting in submission order
//! rather than completion order trades latency for determinism: the outcome
//! only depends on chunk positions, never on which worker finished first.
//!
//! For small inputs the split is declined and the task runs once,
//! synchronously, on the calling thread. Task submission and handoff
//! overhead dominates below the minimum chunk size.

use std::{ops::Range, sync::Arc};

use crate::{
    error::ChunkError,
    future::TaskFuture,
    pool::ResultPool,
};

/// Default minimum number of elements per chunk below which parallel
/// execution is declined. Every strategy has a `*_with` variant taking an
/// explicit value.
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 4;

/// Split `0..len` into `threads` contiguous half-open ranges, or decline.
///
/// Declines (returns no chunks) when the pool has a single worker or the
/// per-chunk share falls below `min_chunk_size`. Otherwise every chunk has
/// `len / threads` elements and the final chunk absorbs the remainder, so
/// the ranges partition `0..len` exactly.
fn plan_chunks(len: usize, threads: usize, min_chunk_size: usize) -> Vec<Range<usize>> {
    if threads <= 1 {
        return Vec::new();
    }
    let chunk_size = len / threads;
    if chunk_size < min_chunk_size {
        return Vec::new();
    }
    (0..threads)
        .map(|indx| {
            let start = indx * chunk_size;
            let end = if indx == threads - 1 {
                len
            } else {
                start + chunk_size
            };
            start..end
        })
        .collect()
}

impl ResultPool {
    /// Search the collection for a single value, one chunk per worker.
    ///
    /// `task` receives one contiguous sub-slice and returns the value it
    /// found there, if any. The chunk futures are awaited in submission
    /// order and the first present value by chunk position wins, even if a
    /// later chunk finished earlier. Returns `Ok(None)` if no chunk found
    /// anything.
    ///
    /// If the split is declined, `task` runs once over the whole collection
    /// on the calling thread.
    pub fn find_one<T, R, F>(
        &self,
        collection: &Arc<[T]>,
        task: F,
    ) -> Result<Option<R>, ChunkError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T]) -> Option<R> + Send + Sync + 'static,
    {
        self.find_one_with(collection, task, DEFAULT_MIN_CHUNK_SIZE)
    }

    /// [`find_one`](Self::find_one) with an explicit minimum chunk size.
    pub fn find_one_with<T, R, F>(
        &self,
        collection: &Arc<[T]>,
        task: F,
        min_chunk_size: usize,
    ) -> Result<Option<R>, ChunkError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T]) -> Option<R> + Send + Sync + 'static,
    {
        let chunks = plan_chunks(collection.len(), self.thread_count(), min_chunk_size);
        if chunks.is_empty() {
            log::debug!(
                "declined to parallelize find-one over {} elements",
                collection.len()
            );
            return Ok(task(collection));
        }

        let futures = self.submit_chunks(collection, Arc::new(task), chunks);

        let mut found = None;
        for (chunk, future) in futures.into_iter().enumerate() {
            let partial = future
                .wait()
                .map_err(|source| ChunkError { chunk, source })?;
            if found.is_none() {
                found = partial;
            }
        }
        Ok(found)
    }

    /// [`find_one`](Self::find_one), substituting `default` when no chunk
    /// found a value.
    pub fn find_one_or<T, R, F>(
        &self,
        collection: &Arc<[T]>,
        task: F,
        default: R,
    ) -> Result<R, ChunkError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T]) -> Option<R> + Send + Sync + 'static,
    {
        Ok(self
            .find_one_with(collection, task, DEFAULT_MIN_CHUNK_SIZE)?
            .unwrap_or(default))
    }

    /// Map the collection to a sequence of results, one chunk per worker.
    ///
    /// `task` receives one contiguous sub-slice and returns its partial
    /// results in order. Partials are concatenated in chunk order, so the
    /// output equals a single-threaded run of `task` over the whole
    /// collection.
    ///
    /// If the split is declined, `task` runs once over the whole collection
    /// on the calling thread.
    pub fn collect_many<T, R, F>(
        &self,
        collection: &Arc<[T]>,
        task: F,
    ) -> Result<Vec<R>, ChunkError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T]) -> Vec<R> + Send + Sync + 'static,
    {
        self.collect_many_with(collection, task, 0, DEFAULT_MIN_CHUNK_SIZE)
    }

    /// [`collect_many`](Self::collect_many) with a result cap and an
    /// explicit minimum chunk size.
    ///
    /// `count` truncates the concatenated output to at most that many
    /// elements; `0` means unbounded. Once the cap is reached, the
    /// remaining futures are still awaited and their results discarded, so
    /// every submitted task is fully consumed before this returns. A
    /// declined split returns the task's full output, uncapped.
    pub fn collect_many_with<T, R, F>(
        &self,
        collection: &Arc<[T]>,
        task: F,
        count: usize,
        min_chunk_size: usize,
    ) -> Result<Vec<R>, ChunkError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&[T]) -> Vec<R> + Send + Sync + 'static,
    {
        let chunks = plan_chunks(collection.len(), self.thread_count(), min_chunk_size);
        if chunks.is_empty() {
            log::debug!(
                "declined to parallelize collect-many over {} elements",
                collection.len()
            );
            return Ok(task(collection));
        }

        let futures = self.submit_chunks(collection, Arc::new(task), chunks);

        let cap = if count == 0 { usize::MAX } else { count };
        let mut results = Vec::new();
        let mut below_cap = true;
        for (chunk, future) in futures.into_iter().enumerate() {
            let partial = future
                .wait()
                .map_err(|source| ChunkError { chunk, source })?;
            if below_cap {
                results.extend(partial);
                if results.len() >= cap {
                    results.truncate(cap);
                    below_cap = false;
                }
            }
        }
        Ok(results)
    }

    /// Submit one result-bearing task per chunk, left to right.
    fn submit_chunks<T, P, F>(
        &self,
        collection: &Arc<[T]>,
        task: Arc<F>,
        chunks: Vec<Range<usize>>,
    ) -> Vec<TaskFuture<P>>
    where
        T: Send + Sync + 'static,
        P: Send + 'static,
        F: Fn(&[T]) -> P + Send + Sync + 'static,
    {
        chunks
            .into_iter()
            .map(|range| {
                let data = Arc::clone(collection);
                let task = Arc::clone(&task);
                self.enqueue_with_result(move || task(&data[range]))
            })
            .collect()
    }
}
