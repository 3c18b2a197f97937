use std::{
    num::NonZeroUsize,
    panic::{AssertUnwindSafe, catch_unwind},
    thread::{self, JoinHandle, available_parallelism},
};

use crate::{
    error::SpawnError,
    future::{TaskFuture, result_task},
    internal::{TaskQueue, panic_message},
};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// What a worker does with a panic from a fire-and-forget task.
///
/// Tasks submitted through [`ResultPool::enqueue`] have no future to carry
/// their failure back to a caller, so the worker loop handles it according
/// to this policy. Result-bearing tasks are unaffected; their panics are
/// always delivered through the [`TaskFuture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanicPolicy {
    /// Log the panic message at error level.
    #[default]
    Log,
    /// Discard the panic silently.
    Ignore,
}

/// A fixed-size pool of worker threads sharing one FIFO task queue.
///
/// Workers are spawned at construction time and live until the pool is
/// dropped. Idle workers block on the queue; each dequeued task runs to
/// completion before the worker picks up the next one. A task panic never
/// kills a worker.
///
/// Dropping the pool signals shutdown, abandons tasks still sitting in the
/// queue and joins every worker. Tasks a worker already dequeued run to
/// completion first.
pub struct ResultPool {
    task_queue: TaskQueue<Task>,
    workers: Vec<JoinHandle<()>>,
}

impl ResultPool {
    /// Create a pool sized to the number of available logical cores minus
    /// one (at least one). Use [`with_num_threads`](Self::with_num_threads)
    /// for an explicit size.
    pub fn new() -> Result<ResultPool, SpawnError> {
        let num_threads = available_parallelism()
            .map(|n| n.get().saturating_sub(1).max(1))
            .unwrap_or(1);
        Self::with_num_threads(NonZeroUsize::new(num_threads).unwrap())
    }

    /// Create a pool with exactly `num_threads` worker threads and the
    /// default [`PanicPolicy`].
    pub fn with_num_threads(num_threads: NonZeroUsize) -> Result<ResultPool, SpawnError> {
        Self::with_panic_policy(num_threads, PanicPolicy::default())
    }

    /// Create a pool with exactly `num_threads` worker threads and the
    /// given policy for fire-and-forget panics.
    ///
    /// Construction is all-or-nothing: if any spawn fails, the workers
    /// spawned so far are shut down and joined before the error is
    /// returned.
    pub fn with_panic_policy(
        num_threads: NonZeroUsize,
        policy: PanicPolicy,
    ) -> Result<ResultPool, SpawnError> {
        let task_queue = TaskQueue::new();
        let mut workers = Vec::with_capacity(num_threads.get());

        for indx in 0..num_threads.get() {
            match spawn_worker(indx, task_queue.clone(), policy) {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    task_queue.shutdown();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(SpawnError(err));
                }
            }
        }

        log::debug!("spawned pool with {} worker threads", workers.len());

        Ok(ResultPool {
            task_queue,
            workers,
        })
    }

    /// Add a fire-and-forget task to the end of the queue.
    ///
    /// Never blocks; the queue is unbounded. If the task panics, the worker
    /// handles it per the pool's [`PanicPolicy`] and keeps serving the
    /// queue. A task enqueued while the pool is shutting down is dropped
    /// unexecuted.
    pub fn enqueue(&self, task: impl FnOnce() + Send + 'static) {
        self.task_queue.push(Box::new(task));
    }

    /// Add a result-bearing task to the end of the queue and return the
    /// future observing its outcome.
    ///
    /// A panic inside `f` is captured and delivered through the future; the
    /// worker is unaffected. If the pool shuts down before the task is
    /// dequeued, waiting on the future yields
    /// [`TaskError::Abandoned`](crate::TaskError::Abandoned).
    pub fn enqueue_with_result<R, F>(&self, f: F) -> TaskFuture<R>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (task, future) = result_task(f);
        self.task_queue.push(Box::new(task));
        future
    }

    /// The number of worker threads, fixed at construction time.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// The number of tasks waiting in the queue. Does not include tasks a
    /// worker is currently executing.
    pub fn queued_tasks(&self) -> usize {
        self.task_queue.len()
    }
}

fn spawn_worker(
    indx: usize,
    task_queue: TaskQueue<Task>,
    policy: PanicPolicy,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("result-pool-{indx}"))
        .spawn(move || {
            while let Some(task) = task_queue.wait_for_task() {
                // Result-bearing tasks capture their own panics; anything
                // unwinding to here came from a fire-and-forget task.
                if let Err(payload) = catch_unwind(AssertUnwindSafe(task)) {
                    match policy {
                        PanicPolicy::Log => {
                            log::error!(
                                "fire-and-forget task panicked: {}",
                                panic_message(payload.as_ref())
                            );
                        }
                        PanicPolicy::Ignore => (),
                    }
                }
            }
        })
}

impl Drop for ResultPool {
    /// Signal shutdown, abandon queued tasks and join every worker thread.
    fn drop(&mut self) {
        let abandoned = self.task_queue.shutdown();
        if !abandoned.is_empty() {
            log::debug!("abandoning {} queued tasks at shutdown", abandoned.len());
        }
        drop(abandoned);

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        log::debug!("pool shut down, all workers joined");
    }
}
