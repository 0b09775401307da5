use crate::application::SessionCommand;
use std::collections::VecDeque;

/// Synchronous FIFO command queue (no async, works in any runtime)
///
/// Inbound transport events park here until the session loop runs them;
/// order in is order executed, which is what keeps matchmaking first come
/// first served.
#[derive(Debug)]
pub struct CommandQueue {
    queue: VecDeque<SessionCommand>,
    max_size: usize,
}

impl CommandQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Push a command (returns error if full)
    pub fn push(&mut self, cmd: SessionCommand) -> Result<(), QueueError> {
        if self.queue.len() >= self.max_size {
            return Err(QueueError::Full { max: self.max_size });
        }
        self.queue.push_back(cmd);
        Ok(())
    }

    /// Pop the next command
    pub fn pop(&mut self) -> Option<SessionCommand> {
        self.queue.pop_front()
    }

    /// Drain all queued commands (for batch processing)
    pub fn drain(&mut self) -> Vec<SessionCommand> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("queue is full (max size: {max})")]
    Full { max: usize },
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(100)
    }
}
