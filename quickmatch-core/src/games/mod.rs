use crate::traits::{GameDescriptor, GameRegistry};

pub mod tic_tac_toe;

pub use tic_tac_toe::{Mark, Move, TicTacToe};

/// Registry with every built-in game registered
pub fn builtin_registry() -> GameRegistry {
    let mut registry = GameRegistry::new();
    registry.register(
        TicTacToe::NAME,
        GameDescriptor::new(TicTacToe::REQUIRED_PLAYERS, || Box::new(TicTacToe::new())),
    );
    registry
}
