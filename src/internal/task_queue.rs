use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex},
};

struct QueueState<T> {
    tasks: VecDeque<T>,
    stopping: bool,
}

struct InnerTaskQueue<T> {
    state: Mutex<QueueState<T>>,
    condvar: Condvar,
}

impl<T> InnerTaskQueue<T> {
    fn new() -> InnerTaskQueue<T> {
        InnerTaskQueue {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                stopping: false,
            }),
            condvar: Condvar::new(),
        }
    }

    fn len(&self) -> usize {
        self.state.lock().unwrap().tasks.len()
    }

    fn push(&self, task: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.stopping {
            return false;
        }
        state.tasks.push_back(task);
        self.condvar.notify_one();
        true
    }

    fn wait_for_task(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            // Stopping is checked under the same lock as the dequeue so a
            // worker can never pop a task the shutdown already abandoned.
            if state.stopping {
                return None;
            }
            match state.tasks.pop_front() {
                Some(task) => return Some(task),
                None => state = self.condvar.wait(state).unwrap(),
            }
        }
    }

    fn shutdown(&self) -> Vec<T> {
        let abandoned = {
            let mut state = self.state.lock().unwrap();
            state.stopping = true;
            state.tasks.drain(..).collect()
        };
        self.condvar.notify_all();
        abandoned
    }
}

/// Unbounded FIFO queue shared between the pool handle and its workers.
///
/// Cloning yields another handle to the same queue.
pub struct TaskQueue<T> {
    inner: Arc<InnerTaskQueue<T>>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> TaskQueue<T> {
        TaskQueue {
            inner: Arc::new(InnerTaskQueue::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Append a task and wake one idle worker. Returns `false` if the queue
    /// is already stopping; the task is dropped unexecuted in that case.
    pub fn push(&self, task: T) -> bool {
        self.inner.push(task)
    }

    /// Block until a task is available and return it, or return [`None`]
    /// once the queue is stopping. Tasks queued before the stop signal are
    /// never handed out after it.
    pub fn wait_for_task(&self) -> Option<T> {
        self.inner.wait_for_task()
    }

    /// Mark the queue as stopping, wake every waiting worker and hand back
    /// the abandoned tasks so the caller can drop them outside the lock.
    pub fn shutdown(&self) -> Vec<T> {
        self.inner.shutdown()
    }
}

impl<T> Clone for TaskQueue<T> {
    fn clone(&self) -> TaskQueue<T> {
        TaskQueue {
            inner: self.inner.clone(),
        }
    }
}
