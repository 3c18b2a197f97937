mod task_queue;
pub(crate) use task_queue::TaskQueue;

mod panic_message;
pub(crate) use panic_message::panic_message;
