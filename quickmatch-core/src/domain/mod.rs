pub mod player;
pub mod room;
pub mod session;

pub use player::{Player, PlayerId, Timestamp};
pub use room::{Room, RoomError, LOBBY_CHANNEL};
pub use session::{ActionOutcome, Admission, Departure, SessionError, SessionManager};
