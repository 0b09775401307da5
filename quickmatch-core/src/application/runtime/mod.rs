mod command_queue;
mod session_loop;

pub use command_queue::{CommandQueue, QueueError};
pub use session_loop::SessionLoop;
