use cucumber::{given, then, when};
use quickmatch_core::SessionEvent;
use quickmatch_tests::MatchWorld;

// ===== Given Steps =====

#[given("a session engine with the built-in games")]
async fn engine_with_builtin_games(_world: &mut MatchWorld) {
    // No-op: the world starts with the built-in registry
}

// ===== When Steps =====

#[when(expr = "{string} connects asking for {string}")]
async fn player_connects(world: &mut MatchWorld, name: String, game: String) {
    world.connect(&name, &game);
}

// ===== Then Steps =====

#[then(expr = "{string} is waiting in the lobby")]
async fn player_is_waiting(world: &mut MatchWorld, name: String) {
    let player_id = world.player_id(&name);
    assert!(
        world.engine.manager().lobby().contains(player_id),
        "{name} should be in the lobby"
    );
    assert!(world.connection(&name).is_in("lobby"));
}

#[then("no room is active")]
async fn no_room_active(world: &mut MatchWorld) {
    assert_eq!(world.engine.manager().room_count(), 0);
}

#[then(expr = "a room is formed for {string}")]
async fn room_formed_for(world: &mut MatchWorld, game: String) {
    match world.last_event.as_ref() {
        Some(SessionEvent::RoomFormed { game_name, .. }) => {
            assert_eq!(game_name, &game);
        }
        other => panic!("expected RoomFormed, got {:?}", other),
    }
    assert_eq!(world.engine.manager().room_count(), 1);
}

#[then(expr = "the room members are {string} and {string} in order")]
async fn room_members_in_order(world: &mut MatchWorld, first: String, second: String) {
    let expected = vec![world.player_id(&first), world.player_id(&second)];

    match world.last_event.as_ref() {
        Some(SessionEvent::RoomFormed { players, .. }) => {
            assert_eq!(players, &expected);
        }
        other => panic!("expected RoomFormed, got {:?}", other),
    }
}

#[then("the lobby is empty")]
async fn lobby_is_empty(world: &mut MatchWorld) {
    assert!(world.engine.manager().lobby().is_empty());
}

#[then(expr = "the command fails mentioning {string}")]
async fn command_fails_mentioning(world: &mut MatchWorld, needle: String) {
    match world.last_event.as_ref() {
        Some(SessionEvent::CommandFailed { reason, .. }) => {
            assert!(
                reason.contains(&needle),
                "reason {reason:?} should mention {needle:?}"
            );
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[then(expr = "{int} players are waiting for {string}")]
async fn players_waiting_for(world: &mut MatchWorld, count: usize, game: String) {
    assert_eq!(world.engine.manager().waiters_for(&game).len(), count);
}
