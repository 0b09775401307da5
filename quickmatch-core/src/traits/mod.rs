pub mod connection;
pub mod game;

pub use connection::Connection;
pub use game::{Game, GameCtor, GameDescriptor, GameError, GameProgress, GameRegistry};
