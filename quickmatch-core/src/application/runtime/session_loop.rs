use crate::application::runtime::{CommandQueue, QueueError};
use crate::application::{SessionCommand, SessionEvent, SessionEventLoop};
use crate::traits::GameRegistry;

/// Serial session runtime: queued commands in, batched events out
///
/// Commands run one at a time and to completion; nothing yields inside a
/// transition, so matchmaking and teardown never interleave. The caller
/// drains emitted events after each poll.
#[derive(Debug)]
pub struct SessionLoop {
    /// Stateful engine (owns the lobby and rooms)
    event_loop: SessionEventLoop,

    /// Inbound command queue
    inbound: CommandQueue,

    /// Outbound events (caller drains this)
    outbound: Vec<SessionEvent>,

    /// Max commands to process per poll
    batch_size: usize,
}

impl SessionLoop {
    pub fn new(registry: GameRegistry, batch_size: usize, max_queue_size: usize) -> Self {
        Self {
            event_loop: SessionEventLoop::new(registry),
            inbound: CommandQueue::new(max_queue_size),
            outbound: Vec::new(),
            batch_size,
        }
    }

    /// Submit a command (non-blocking)
    pub fn submit(&mut self, cmd: SessionCommand) -> Result<(), QueueError> {
        self.inbound.push(cmd)
    }

    /// Process up to `batch_size` commands; returns how many ran
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.batch_size {
            match self.inbound.pop() {
                Some(cmd) => {
                    let event = self.event_loop.handle_command(cmd);
                    self.outbound.push(event);
                    processed += 1;
                }
                None => break,
            }
        }

        processed
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbound)
    }

    /// Read access to the engine (for queries)
    pub fn event_loop(&self) -> &SessionEventLoop {
        &self.event_loop
    }
}
