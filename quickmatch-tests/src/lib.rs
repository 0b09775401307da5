use cucumber::World;
use quickmatch_core::{
    games, Connection, Player, PlayerId, SessionCommand, SessionEvent, SessionEventLoop,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Transport fake shared by the BDD scenarios
#[derive(Debug, Default)]
pub struct RecordingConnection {
    sent: Mutex<Vec<(String, serde_json::Value)>>,
    joined: Mutex<Vec<String>>,
    left: Mutex<Vec<String>>,
}

impl RecordingConnection {
    pub fn received(&self, event: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|(name, _)| name == event)
    }

    /// Currently subscribed: joined more often than left
    pub fn is_in(&self, channel: &str) -> bool {
        let joins = self
            .joined
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == channel)
            .count();
        let leaves = self
            .left
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == channel)
            .count();
        joins > leaves
    }
}

impl Connection for RecordingConnection {
    fn send(&self, event: &str, payload: serde_json::Value) {
        self.sent.lock().unwrap().push((event.to_string(), payload));
    }

    fn join(&self, channel: &str) {
        self.joined.lock().unwrap().push(channel.to_string());
    }

    fn leave(&self, channel: &str) {
        self.left.lock().unwrap().push(channel.to_string());
    }
}

/// Shared state for the BDD scenarios
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct MatchWorld {
    pub engine: SessionEventLoop,
    pub players: HashMap<String, Player>,
    pub connections: HashMap<String, Arc<RecordingConnection>>,
    pub last_event: Option<SessionEvent>,
}

impl MatchWorld {
    /// Fresh engine with the built-in games registered
    pub fn new() -> Self {
        Self {
            engine: SessionEventLoop::new(games::builtin_registry()),
            players: HashMap::new(),
            connections: HashMap::new(),
            last_event: None,
        }
    }

    /// Connect a named player asking for a game
    ///
    /// A name seen before reuses the same player identity, so scenarios
    /// can exercise duplicate admission.
    pub fn connect(&mut self, name: &str, game: &str) {
        let player = match self.players.get(name) {
            Some(existing) => existing.clone(),
            None => {
                let conn = Arc::new(RecordingConnection::default());
                let player = Player::new(conn.clone());
                self.connections.insert(name.to_string(), conn);
                self.players.insert(name.to_string(), player.clone());
                player
            }
        };

        let event = self.engine.handle_command(SessionCommand::Connect {
            player,
            game_name: game.to_string(),
        });
        self.last_event = Some(event);
    }

    /// Deliver a disconnect notice for a named player
    pub fn disconnect(&mut self, name: &str) {
        let player_id = self.player_id(name);
        let event = self
            .engine
            .handle_command(SessionCommand::Disconnect { player_id });
        self.last_event = Some(event);
    }

    pub fn player_id(&self, name: &str) -> PlayerId {
        self.players
            .get(name)
            .unwrap_or_else(|| panic!("no player named {name} in this scenario"))
            .id()
    }

    pub fn connection(&self, name: &str) -> &RecordingConnection {
        self.connections
            .get(name)
            .unwrap_or_else(|| panic!("no connection named {name} in this scenario"))
    }
}

impl Default for MatchWorld {
    fn default() -> Self {
        Self::new()
    }
}
