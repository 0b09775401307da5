use crate::traits::Connection;
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identity of a connected player
pub type PlayerId = Uuid;

/// Timestamp in milliseconds since process start (monotonic)
///
/// Serializable and comparable, suitable for deterministic ordering.
/// Uses instant::Instant internally for WASM compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp representing the current moment
    pub fn now() -> Self {
        // Use a static anchor point for all timestamps in the process
        static ANCHOR: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);

        let elapsed = Instant::now().duration_since(*anchor);
        Timestamp(elapsed.as_millis() as u64)
    }

    /// Get the raw milliseconds value
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Create a timestamp from a raw milliseconds value (for testing)
    #[cfg(test)]
    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Domain entity wrapping one transport connection
///
/// Exists purely to give a connection a stable identity and a uniform
/// interface independent of transport details. Created when a client
/// connects, dropped when it disconnects or its room is disbanded.
#[derive(Clone)]
pub struct Player {
    /// Identity token; two players are never equal by connection contents
    id: PlayerId,
    connection: Arc<dyn Connection>,
    /// When this player entered matchmaking
    queued_at: Timestamp,
}

impl Player {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            id: Uuid::new_v4(),
            connection,
            queued_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn queued_at(&self) -> Timestamp {
        self.queued_at
    }

    /// Forward one named event to the underlying connection
    pub fn notify(&self, event: &str, payload: serde_json::Value) {
        self.connection.send(event, payload);
    }

    /// Scope this player into a broadcast channel
    pub fn enter_channel(&self, name: &str) {
        self.connection.join(name);
    }

    /// Scope this player out of a broadcast channel
    pub fn leave_channel(&self, name: &str) {
        self.connection.leave(name);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("queued_at", &self.queued_at)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}
