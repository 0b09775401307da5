use crate::domain::player::{Player, PlayerId};
use crate::domain::room::{Room, RoomError};
use crate::traits::{Game, GameError, GameProgress, GameRegistry};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Result of admitting a player into matchmaking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Not enough peers yet; the player waits in the lobby
    Queued {
        /// Waiters for this game, the new arrival included
        waiting: usize,
    },
    /// The threshold was reached; a room formed around a fresh game
    Matched {
        room_id: Uuid,
        /// Members in arrival order
        players: Vec<PlayerId>,
    },
}

/// Result of a disconnect notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The player was waiting in the lobby and was removed quietly
    FromLobby,
    /// The player was in an active room; the whole room was torn down
    RoomDisbanded { room_id: Uuid },
    /// The player was found nowhere; repeated delivery is harmless
    Unknown,
}

/// Result of routing an in-game action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The game accepted the action and continues
    Advanced {
        room_id: Uuid,
        state: serde_json::Value,
    },
    /// The action ended the game; the room was disbanded
    Finished {
        room_id: Uuid,
        state: serde_json::Value,
    },
}

/// Errors that can occur in session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("player {0} is already waiting in the lobby")]
    AlreadyQueued(PlayerId),

    #[error("player {0} is already in an active room")]
    AlreadyInRoom(PlayerId),

    #[error("player {0} is not in any active room")]
    NotInRoom(PlayerId),

    #[error("room error: {0}")]
    Room(#[from] RoomError),

    #[error("game error: {0}")]
    Game(#[from] GameError),
}

/// Aggregate owning all matchmaking state
///
/// One lobby, one immutable game registry, and the set of active game
/// rooms. Every mutation goes through `admit`, `disconnect` or
/// `dispatch_action`; each runs to completion before the next, so the
/// single `&mut self` access is the whole mutual-exclusion story. Players
/// are matched strictly in arrival order, first come first served.
pub struct SessionManager {
    lobby: Room,
    registry: GameRegistry,
    rooms: Vec<Room>,
    /// Requested game per lobby waiter
    waiting: HashMap<PlayerId, String>,
}

impl SessionManager {
    /// Create a manager around a populated registry
    pub fn new(registry: GameRegistry) -> Self {
        Self {
            lobby: Room::lobby(),
            registry,
            rooms: Vec::new(),
            waiting: HashMap::new(),
        }
    }

    // ===== Inspection =====

    pub fn lobby(&self) -> &Room {
        &self.lobby
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    /// Active game rooms in creation order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lobby waiters for one game, in arrival order
    pub fn waiters_for(&self, game_name: &str) -> Vec<&Player> {
        self.lobby
            .players()
            .iter()
            .filter(|p| self.waiting.get(&p.id()).is_some_and(|g| g == game_name))
            .collect()
    }

    // ===== Admission & matchmaking =====

    /// Admit a player who asked for `game_name`
    ///
    /// The player queues in the lobby until enough peers want the same
    /// game, at which point the first N waiters (arrival order) move into
    /// a fresh room bound to a fresh game instance. Every failure is
    /// checked before any mutation: a rejected player is admitted nowhere.
    pub fn admit(&mut self, player: Player, game_name: &str) -> Result<Admission, SessionError> {
        let required = match self.registry.get(game_name) {
            Some(descriptor) => descriptor.required_players(),
            None => return Err(SessionError::UnknownGame(game_name.to_string())),
        };

        let player_id = player.id();
        if self.lobby.contains(player_id) {
            return Err(SessionError::AlreadyQueued(player_id));
        }
        if self.rooms.iter().any(|r| r.contains(player_id)) {
            return Err(SessionError::AlreadyInRoom(player_id));
        }

        self.lobby.add_player(player)?;
        self.waiting.insert(player_id, game_name.to_string());
        tracing::debug!(player = %player_id, game = game_name, "player queued");

        // First N waiters for this game, arrival order
        let matched: Vec<PlayerId> = self
            .waiters_for(game_name)
            .iter()
            .take(required)
            .map(|p| p.id())
            .collect();

        if matched.len() < required {
            return Ok(Admission::Queued {
                waiting: matched.len(),
            });
        }

        let game = self
            .registry
            .get(game_name)
            .ok_or_else(|| SessionError::UnknownGame(game_name.to_string()))?
            .construct();

        let mut room = Room::new();
        for id in &matched {
            self.waiting.remove(id);
            let member = self.lobby.remove_player(*id)?;
            room.add_player(member)?;
        }
        room.bind_game(game)?;

        let room_id = room.id();
        tracing::info!(
            room = %room_id,
            game = game_name,
            players = matched.len(),
            "room formed"
        );
        self.rooms.push(room);

        Ok(Admission::Matched {
            room_id,
            players: matched,
        })
    }

    // ===== Teardown =====

    /// Handle a disconnect notice for a player
    ///
    /// Lobby waiters are removed quietly. A member of an active room takes
    /// the whole room down with them: the remaining members are notified
    /// and unsubscribed, the game is released. Safe to deliver more than
    /// once; a disconnect for an unknown player is a no-op.
    pub fn disconnect(&mut self, player_id: PlayerId) -> Departure {
        if self.lobby.contains(player_id) {
            if let Ok(player) = self.lobby.remove_player(player_id) {
                self.waiting.remove(&player.id());
            }
            tracing::info!(player = %player_id, "player left the lobby");
            return Departure::FromLobby;
        }

        if let Some(index) = self.rooms.iter().position(|r| r.contains(player_id)) {
            let room = self.rooms.remove(index);
            let room_id = room.id();
            room.disband("player disconnected", Some(player_id));
            tracing::info!(room = %room_id, player = %player_id, "room torn down after disconnect");
            return Departure::RoomDisbanded { room_id };
        }

        tracing::debug!(player = %player_id, "disconnect for unknown player ignored");
        Departure::Unknown
    }

    // ===== In-game actions =====

    /// Route one action from a player into their room's game
    ///
    /// The game sees the player as their seat index. The resulting state
    /// snapshot is broadcast to the room; when the game reports itself
    /// over, the room is disbanded.
    pub fn dispatch_action(
        &mut self,
        player_id: PlayerId,
        action: serde_json::Value,
    ) -> Result<ActionOutcome, SessionError> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.contains(player_id))
            .ok_or(SessionError::NotInRoom(player_id))?;

        let (room_id, state, progress) = {
            let room = &mut self.rooms[index];
            let seat = room
                .position(player_id)
                .ok_or(SessionError::NotInRoom(player_id))?;
            let game = room.game_mut().ok_or(RoomError::NoGameBound)?;

            let progress = game.apply(seat, action)?;
            let state = game.state();
            room.broadcast("game_state", &state);
            (room.id(), state, progress)
        };

        match progress {
            GameProgress::Continue => Ok(ActionOutcome::Advanced { room_id, state }),
            GameProgress::Over => {
                let room = self.rooms.remove(index);
                room.disband("game over", None);
                tracing::info!(room = %room_id, "game finished, session closed");
                Ok(ActionOutcome::Finished { room_id, state })
            }
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("lobby", &self.lobby)
            .field("rooms", &self.rooms)
            .field("registry", &self.registry)
            .finish()
    }
}
