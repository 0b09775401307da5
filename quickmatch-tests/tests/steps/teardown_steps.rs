use cucumber::{given, then, when};
use quickmatch_core::SessionEvent;
use quickmatch_tests::MatchWorld;
use uuid::Uuid;

// ===== Given Steps =====

#[given(expr = "a running {string} room with {string} and {string}")]
async fn running_room(world: &mut MatchWorld, game: String, first: String, second: String) {
    world.connect(&first, &game);
    world.connect(&second, &game);

    assert_eq!(
        world.engine.manager().room_count(),
        1,
        "the room should have formed"
    );
}

// ===== When Steps =====

#[when(expr = "{string} disconnects")]
async fn player_disconnects(world: &mut MatchWorld, name: String) {
    world.disconnect(&name);
}

#[when(expr = "{string} disconnects again")]
async fn player_disconnects_again(world: &mut MatchWorld, name: String) {
    world.disconnect(&name);
}

#[when("a disconnect arrives for a player nobody knows")]
async fn disconnect_for_stranger(world: &mut MatchWorld) {
    let stranger = Uuid::new_v4();
    let event = world
        .engine
        .handle_command(quickmatch_core::SessionCommand::Disconnect { player_id: stranger });
    world.last_event = Some(event);
}

// ===== Then Steps =====

#[then("the room is disbanded")]
async fn room_is_disbanded(world: &mut MatchWorld) {
    assert!(matches!(
        world.last_event,
        Some(SessionEvent::RoomDisbanded { .. })
    ));
    assert_eq!(world.engine.manager().room_count(), 0);
}

#[then(expr = "{string} was told the room closed")]
async fn was_told_room_closed(world: &mut MatchWorld, name: String) {
    assert!(
        world.connection(&name).received("room_closed"),
        "{name} should have received a room_closed event"
    );
}

#[then(expr = "{string} is no longer waiting")]
async fn no_longer_waiting(world: &mut MatchWorld, name: String) {
    let player_id = world.player_id(&name);
    assert!(!world.engine.manager().lobby().contains(player_id));
}

#[then("the running room is unaffected")]
async fn running_room_unaffected(world: &mut MatchWorld) {
    assert_eq!(world.engine.manager().room_count(), 1);
}

#[then("the disconnect is ignored")]
async fn disconnect_is_ignored(world: &mut MatchWorld) {
    assert!(matches!(
        world.last_event,
        Some(SessionEvent::DisconnectIgnored { .. })
    ));
}
