use crate::domain::{Player, PlayerId};

/// Commands the transport layer feeds into the session engine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// A client connected and asked for a game by name
    Connect {
        player: Player,
        game_name: String,
    },

    /// A client's connection dropped
    Disconnect { player_id: PlayerId },

    /// A client sent an in-game action
    Action {
        player_id: PlayerId,
        action: serde_json::Value,
    },
}
