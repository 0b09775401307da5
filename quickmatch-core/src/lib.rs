pub mod application;
pub mod domain;
pub mod games;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::runtime::{CommandQueue, QueueError, SessionLoop};
pub use application::{SessionCommand, SessionEvent, SessionEventLoop};
pub use domain::{
    ActionOutcome, Admission, Departure, Player, PlayerId, Room, RoomError, SessionError,
    SessionManager, Timestamp, LOBBY_CHANNEL,
};
pub use traits::{Connection, Game, GameDescriptor, GameError, GameProgress, GameRegistry};
