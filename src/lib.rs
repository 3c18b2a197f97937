//! # Result Pool
//!
//! This crate provides a fixed-size worker thread pool with result futures
//! and data-parallel helpers for processing collections in chunks.
//! A [`ResultPool`] owns long-lived worker threads sharing one FIFO task
//! queue; tasks are submitted fire-and-forget with [`ResultPool::enqueue`]
//! or with a blocking [`TaskFuture`] via
//! [`ResultPool::enqueue_with_result`].
//!
//! ## Result-bearing tasks
//! ```rust
//! use result_pool::prelude::*;
//! use std::num::NonZeroUsize;
//!
//! let pool = ResultPool::with_num_threads(NonZeroUsize::new(4).unwrap()).unwrap();
//!
//! let future = pool.enqueue_with_result(|| 6 * 7);
//!
//! assert_eq!(future.wait(), Ok(42));
//! ```
//!
//! A panic inside a result-bearing task is captured and delivered through
//! its future; the worker thread keeps serving the queue:
//! ```rust
//! use result_pool::prelude::*;
//! use std::num::NonZeroUsize;
//!
//! let pool = ResultPool::with_num_threads(NonZeroUsize::new(2).unwrap()).unwrap();
//!
//! let future = pool.enqueue_with_result(|| -> u32 { panic!("boom") });
//!
//! assert!(matches!(future.wait(), Err(TaskError::Panicked(_))));
//! ```
//!
//! ## Parallel execution over collections
//! [`ResultPool::collect_many`] splits a collection into one contiguous
//! chunk per worker, runs the task on every chunk concurrently and
//! concatenates the partial results in chunk order. The output is identical
//! to a single-threaded run:
//! ```rust
//! use result_pool::prelude::*;
//! use std::{num::NonZeroUsize, sync::Arc};
//!
//! let pool = ResultPool::with_num_threads(NonZeroUsize::new(4).unwrap()).unwrap();
//! let numbers: Arc<[u64]> = (0..1000).collect();
//!
//! let squares = pool
//!     .collect_many(&numbers, |chunk| chunk.iter().map(|n| n * n).collect())
//!     .unwrap();
//!
//! assert_eq!(squares.len(), 1000);
//! assert_eq!(squares[30], 900);
//! ```
//!
//! [`ResultPool::find_one`] searches the chunks for a single value and
//! returns the first hit by chunk position, not the first to complete:
//! ```rust
//! use result_pool::prelude::*;
//! use std::{num::NonZeroUsize, sync::Arc};
//!
//! let pool = ResultPool::with_num_threads(NonZeroUsize::new(4).unwrap()).unwrap();
//! let numbers: Arc<[u64]> = (0..1000).collect();
//!
//! let hit = pool
//!     .find_one(&numbers, |chunk| chunk.iter().find(|&&n| n % 431 == 430).copied())
//!     .unwrap();
//!
//! assert_eq!(hit, Some(430));
//! ```
//!
//! For collections too small to be worth splitting, both helpers fall back
//! to running the task once on the calling thread.

mod internal;

mod error;
pub use error::{ChunkError, SpawnError, TaskError};

mod future;
pub use future::{TaskFuture, TaskResult};

mod pool;
pub use pool::{PanicPolicy, ResultPool};

mod parallel;
pub use parallel::DEFAULT_MIN_CHUNK_SIZE;

pub mod prelude {
    pub use crate::error::{ChunkError, SpawnError, TaskError};
    pub use crate::future::{TaskFuture, TaskResult};
    pub use crate::parallel::DEFAULT_MIN_CHUNK_SIZE;
    pub use crate::pool::{PanicPolicy, ResultPool};
}
