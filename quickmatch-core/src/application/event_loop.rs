use crate::application::{SessionCommand, SessionEvent};
use crate::domain::{ActionOutcome, Admission, Departure, Player, PlayerId, SessionManager};
use crate::traits::GameRegistry;

/// Session engine that processes transport commands and emits events
///
/// Every command maps to exactly one event; failures become
/// `SessionEvent::CommandFailed` instead of propagating, so the transport
/// can forward the outcome to the client without caring which layer
/// rejected it.
#[derive(Debug)]
pub struct SessionEventLoop {
    manager: SessionManager,
}

impl SessionEventLoop {
    /// Create an engine around a populated registry
    pub fn new(registry: GameRegistry) -> Self {
        Self {
            manager: SessionManager::new(registry),
        }
    }

    /// Process a single command and return the resulting event
    pub fn handle_command(&mut self, command: SessionCommand) -> SessionEvent {
        match command {
            SessionCommand::Connect { player, game_name } => {
                self.handle_connect(player, game_name)
            }
            SessionCommand::Disconnect { player_id } => self.handle_disconnect(player_id),
            SessionCommand::Action { player_id, action } => {
                self.handle_action(player_id, action)
            }
        }
    }

    /// Read access to the session state (for queries and tests)
    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    fn handle_connect(&mut self, player: Player, game_name: String) -> SessionEvent {
        let player_id = player.id();
        match self.manager.admit(player, &game_name) {
            Ok(Admission::Queued { waiting }) => SessionEvent::PlayerQueued {
                player_id,
                game_name,
                waiting,
            },
            Ok(Admission::Matched { room_id, players }) => SessionEvent::RoomFormed {
                room_id,
                game_name,
                players,
            },
            Err(e) => SessionEvent::CommandFailed {
                command: "Connect".to_string(),
                reason: e.to_string(),
            },
        }
    }

    fn handle_disconnect(&mut self, player_id: PlayerId) -> SessionEvent {
        match self.manager.disconnect(player_id) {
            Departure::FromLobby => SessionEvent::PlayerDequeued { player_id },
            Departure::RoomDisbanded { room_id } => SessionEvent::RoomDisbanded {
                room_id,
                player_id,
            },
            Departure::Unknown => SessionEvent::DisconnectIgnored { player_id },
        }
    }

    fn handle_action(&mut self, player_id: PlayerId, action: serde_json::Value) -> SessionEvent {
        match self.manager.dispatch_action(player_id, action) {
            Ok(ActionOutcome::Advanced { room_id, state }) => {
                SessionEvent::GameAdvanced { room_id, state }
            }
            Ok(ActionOutcome::Finished { room_id, state }) => {
                SessionEvent::GameFinished { room_id, state }
            }
            Err(e) => SessionEvent::CommandFailed {
                command: "Action".to_string(),
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{self, TicTacToe};
    use crate::test_support::RecordingConnection;
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    fn engine() -> SessionEventLoop {
        SessionEventLoop::new(games::builtin_registry())
    }

    fn connect(engine: &mut SessionEventLoop, game: &str) -> (PlayerId, SessionEvent) {
        let player = Player::new(Arc::new(RecordingConnection::default()));
        let player_id = player.id();
        let event = engine.handle_command(SessionCommand::Connect {
            player,
            game_name: game.to_string(),
        });
        (player_id, event)
    }

    #[test]
    fn test_connect_queues_until_threshold() {
        let mut engine = engine();

        let (a, first) = connect(&mut engine, TicTacToe::NAME);
        assert_eq!(
            first,
            SessionEvent::PlayerQueued {
                player_id: a,
                game_name: TicTacToe::NAME.to_string(),
                waiting: 1,
            }
        );

        let (b, second) = connect(&mut engine, TicTacToe::NAME);
        match second {
            SessionEvent::RoomFormed {
                game_name, players, ..
            } => {
                assert_eq!(game_name, TicTacToe::NAME);
                assert_eq!(players, vec![a, b]);
            }
            other => panic!("expected RoomFormed, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_unknown_game_fails_as_event() {
        let mut engine = engine();

        let (_, event) = connect(&mut engine, "Chess");

        match event {
            SessionEvent::CommandFailed { command, reason } => {
                assert_eq!(command, "Connect");
                assert!(reason.contains("Chess"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
        assert!(engine.manager().lobby().is_empty());
    }

    #[test]
    fn test_disconnect_variants() {
        let mut engine = engine();

        // Unknown player: ignored, not an error
        let stranger = Uuid::new_v4();
        assert_eq!(
            engine.handle_command(SessionCommand::Disconnect { player_id: stranger }),
            SessionEvent::DisconnectIgnored { player_id: stranger }
        );

        // Lobby waiter: dequeued
        let (a, _) = connect(&mut engine, TicTacToe::NAME);
        assert_eq!(
            engine.handle_command(SessionCommand::Disconnect { player_id: a }),
            SessionEvent::PlayerDequeued { player_id: a }
        );

        // Room member: the whole room goes
        let (b, _) = connect(&mut engine, TicTacToe::NAME);
        let (c, formed) = connect(&mut engine, TicTacToe::NAME);
        let SessionEvent::RoomFormed { room_id, .. } = formed else {
            panic!("expected RoomFormed");
        };
        let _ = c;
        assert_eq!(
            engine.handle_command(SessionCommand::Disconnect { player_id: b }),
            SessionEvent::RoomDisbanded {
                room_id,
                player_id: b
            }
        );
        assert_eq!(engine.manager().room_count(), 0);
    }

    #[test]
    fn test_action_events() {
        let mut engine = engine();
        let (a, _) = connect(&mut engine, TicTacToe::NAME);
        let (b, _) = connect(&mut engine, TicTacToe::NAME);

        let event = engine.handle_command(SessionCommand::Action {
            player_id: a,
            action: json!({ "cell": 0 }),
        });
        assert!(matches!(event, SessionEvent::GameAdvanced { .. }));

        // An illegal move fails as an event and changes nothing
        let event = engine.handle_command(SessionCommand::Action {
            player_id: b,
            action: json!({ "cell": 0 }),
        });
        match event {
            SessionEvent::CommandFailed { command, .. } => assert_eq!(command, "Action"),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
        assert_eq!(engine.manager().room_count(), 1);
    }

    #[test]
    fn test_winning_action_finishes_game() {
        let mut engine = engine();
        let (a, _) = connect(&mut engine, TicTacToe::NAME);
        let (b, _) = connect(&mut engine, TicTacToe::NAME);

        for (player_id, cell) in [(a, 0), (b, 3), (a, 1), (b, 4)] {
            let event = engine.handle_command(SessionCommand::Action {
                player_id,
                action: json!({ "cell": cell }),
            });
            assert!(matches!(event, SessionEvent::GameAdvanced { .. }));
        }

        let event = engine.handle_command(SessionCommand::Action {
            player_id: a,
            action: json!({ "cell": 2 }),
        });

        match event {
            SessionEvent::GameFinished { state, .. } => assert_eq!(state["winner"], 0),
            other => panic!("expected GameFinished, got {:?}", other),
        }
        assert_eq!(engine.manager().room_count(), 0);
    }
}
