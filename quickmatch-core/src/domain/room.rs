use crate::domain::player::{Player, PlayerId};
use crate::traits::Game;
use std::fmt;
use uuid::Uuid;

/// Broadcast channel shared by every player waiting in the lobby
pub const LOBBY_CHANNEL: &str = "lobby";

/// An ordered group of players, optionally bound to one running game
///
/// Membership order is arrival order. The lobby is the one room without a
/// game; a game room's membership is frozen the moment its game is bound
/// and only full disbandment releases it. Adding a player scopes their
/// connection into the room's broadcast channel, removing scopes it out.
pub struct Room {
    id: Uuid,
    channel: String,
    players: Vec<Player>,
    game: Option<Box<dyn Game>>,
}

/// Errors that can occur in room operations
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RoomError {
    #[error("room membership is frozen once a game is bound")]
    MembershipFrozen,

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("a game is already bound to this room")]
    GameAlreadyBound,

    #[error("room has {actual} players but the game requires {required}")]
    WrongPlayerCount { required: usize, actual: usize },

    #[error("no game is bound to this room")]
    NoGameBound,
}

impl Room {
    /// Create an empty room with a fresh broadcast channel
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        Self {
            channel: format!("room-{id}"),
            id,
            players: Vec::new(),
            game: None,
        }
    }

    /// Create the lobby room, which uses the fixed channel name
    pub fn lobby() -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: LOBBY_CHANNEL.to_string(),
            players: Vec::new(),
            game: None,
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Name of this room's broadcast channel
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Current membership in arrival order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == player_id)
    }

    /// Seat index of a member: their position in arrival order
    pub fn position(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player_id)
    }

    pub fn game(&self) -> Option<&dyn Game> {
        self.game.as_deref()
    }

    pub fn game_mut(&mut self) -> Option<&mut (dyn Game + 'static)> {
        self.game.as_deref_mut()
    }

    // ===== Membership =====

    /// Append a player and scope them into the room channel
    ///
    /// Fails once a game is bound: a game room's membership is fixed at
    /// creation.
    pub fn add_player(&mut self, player: Player) -> Result<(), RoomError> {
        if self.game.is_some() {
            return Err(RoomError::MembershipFrozen);
        }

        player.enter_channel(&self.channel);
        self.players.push(player);
        Ok(())
    }

    /// Remove a player by identity and scope them out of the room channel
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, RoomError> {
        if self.game.is_some() {
            return Err(RoomError::MembershipFrozen);
        }

        let index = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or(RoomError::PlayerNotFound(player_id))?;

        let player = self.players.remove(index);
        player.leave_channel(&self.channel);
        Ok(player)
    }

    // ===== Game binding =====

    /// Attach a game instance; legal only once, and only with exactly the
    /// required membership already present
    pub fn bind_game(&mut self, game: Box<dyn Game>) -> Result<(), RoomError> {
        if self.game.is_some() {
            return Err(RoomError::GameAlreadyBound);
        }

        let required = game.required_players();
        if self.players.len() != required {
            return Err(RoomError::WrongPlayerCount {
                required,
                actual: self.players.len(),
            });
        }

        tracing::debug!(room = %self.id, game = game.name(), "game bound");
        self.game = Some(game);
        Ok(())
    }

    // ===== Broadcast & teardown =====

    /// Send one event to every member
    pub fn broadcast(&self, event: &str, payload: &serde_json::Value) {
        for player in &self.players {
            player.notify(event, payload.clone());
        }
    }

    /// Tear the room down: notify members, scope them out of the channel,
    /// release the game
    ///
    /// `skip` suppresses the farewell for a member whose transport is
    /// already gone (the disconnecting player).
    pub fn disband(mut self, reason: &str, skip: Option<PlayerId>) {
        tracing::info!(room = %self.id, reason, members = self.players.len(), "room disbanded");

        let payload = serde_json::json!({ "room": self.id, "reason": reason });
        for player in self.players.drain(..) {
            if Some(player.id()) != skip {
                player.notify("room_closed", payload.clone());
            }
            player.leave_channel(&self.channel);
        }
        // the bound game is dropped with self
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .field("players", &self.players)
            .field("game", &self.game.as_ref().map(|g| g.name()))
            .finish()
    }
}
