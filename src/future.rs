use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::mpsc::{Receiver, Sender, channel},
};

use crate::{error::TaskError, internal::panic_message};

/// Outcome of a result-bearing task.
pub type TaskResult<R> = Result<R, TaskError>;

/// The consumer half of a result-bearing task.
///
/// Returned by [`ResultPool::enqueue_with_result`](crate::ResultPool::enqueue_with_result).
/// The worker writes the outcome at most once; [`wait`](TaskFuture::wait)
/// reads it exactly once, consuming the future.
pub struct TaskFuture<R> {
    receiver: Receiver<TaskResult<R>>,
}

impl<R> TaskFuture<R> {
    /// Block until the task's outcome is available and return it.
    ///
    /// Returns [`TaskError::Panicked`] if the task function panicked and
    /// [`TaskError::Abandoned`] if the pool shut down before the task was
    /// dequeued.
    pub fn wait(self) -> TaskResult<R> {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::Abandoned),
        }
    }

    /// Return the outcome if it is already available, otherwise hand the
    /// future back. Never blocks.
    pub fn try_wait(self) -> Result<TaskResult<R>, TaskFuture<R>> {
        use std::sync::mpsc::TryRecvError;
        match self.receiver.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(TaskError::Abandoned)),
        }
    }
}

/// Wrap `f` into a queueable closure plus the future observing its outcome.
///
/// The closure captures a panic inside `f` and delivers it through the
/// future instead of unwinding into the worker loop. If the future was
/// dropped before the task ran, the outcome is discarded.
pub(crate) fn result_task<R, F>(f: F) -> (impl FnOnce() + Send + 'static, TaskFuture<R>)
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let (sender, receiver): (Sender<TaskResult<R>>, _) = channel();

    let task = move || {
        let outcome = catch_unwind(AssertUnwindSafe(f))
            .map_err(|payload| TaskError::Panicked(panic_message(payload.as_ref())));
        if sender.send(outcome).is_err() {
            log::debug!("task outcome discarded, future was dropped");
        }
    };

    (task, TaskFuture { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_handoff() {
        let (task, future) = result_task(|| 21 * 2);
        task();
        assert_eq!(future.wait(), Ok(42));
    }

    #[test]
    fn test_panic_is_captured() {
        let (task, future) = result_task(|| -> u32 { panic!("boom") });
        task();
        assert_eq!(future.wait(), Err(TaskError::Panicked("boom".to_string())));
    }

    #[test]
    fn test_abandoned_task_resolves_to_error() {
        let (task, future) = result_task(|| 1);
        drop(task);
        assert_eq!(future.wait(), Err(TaskError::Abandoned));
    }

    #[test]
    fn test_try_wait() {
        let (task, future) = result_task(|| 7);
        let future = match future.try_wait() {
            Err(future) => future,
            Ok(_) => panic!("outcome should not be ready yet"),
        };
        task();
        match future.try_wait() {
            Ok(outcome) => assert_eq!(outcome, Ok(7)),
            Err(_) => panic!("outcome should be ready after the task ran"),
        }
    }
}
