use crate::domain::PlayerId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the session engine after command execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Player is waiting in the lobby for more peers
    PlayerQueued {
        player_id: PlayerId,
        game_name: String,
        /// Waiters for this game, the new arrival included
        waiting: usize,
    },

    /// Enough players arrived; a room formed around a fresh game
    RoomFormed {
        room_id: Uuid,
        game_name: String,
        /// Members in arrival order
        players: Vec<PlayerId>,
    },

    /// A lobby waiter left before being matched
    PlayerDequeued { player_id: PlayerId },

    /// An active room was torn down because a member disconnected
    RoomDisbanded { room_id: Uuid, player_id: PlayerId },

    /// A game action was applied and the game continues
    GameAdvanced {
        room_id: Uuid,
        state: serde_json::Value,
    },

    /// A game action ended the game; the session is closed
    GameFinished {
        room_id: Uuid,
        state: serde_json::Value,
    },

    /// A disconnect arrived for a player no longer known
    DisconnectIgnored { player_id: PlayerId },

    /// Command failed
    CommandFailed { command: String, reason: String },
}
