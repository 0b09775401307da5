use crate::traits::{Game, GameError, GameProgress};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Board mark, assigned by seat: seat 0 plays X, seat 1 plays O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

/// Action payload a client sends to claim a cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Move {
    /// Cell index, row-major, 0..=8
    pub cell: usize,
}

/// Classic 3x3 tic-tac-toe for exactly two players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    /// Seat whose move it is
    turn: usize,
    winner: Option<usize>,
    moves: usize,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl TicTacToe {
    pub const NAME: &'static str = "TicTacToe";
    pub const REQUIRED_PLAYERS: usize = 2;

    pub fn new() -> Self {
        Self {
            board: [None; 9],
            turn: 0,
            winner: None,
            moves: 0,
        }
    }

    /// Winning seat, if any
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.moves == 9
    }

    fn mark_for(seat: usize) -> Mark {
        if seat == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    fn seat_for(mark: Mark) -> usize {
        match mark {
            Mark::X => 0,
            Mark::O => 1,
        }
    }

    fn winning_seat(&self) -> Option<usize> {
        LINES.iter().find_map(|line| {
            let first = self.board[line[0]]?;
            if line.iter().all(|&cell| self.board[cell] == Some(first)) {
                Some(Self::seat_for(first))
            } else {
                None
            }
        })
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_players(&self) -> usize {
        Self::REQUIRED_PLAYERS
    }

    fn apply(
        &mut self,
        seat: usize,
        action: serde_json::Value,
    ) -> Result<GameProgress, GameError> {
        if seat >= Self::REQUIRED_PLAYERS {
            return Err(GameError::UnknownSeat(seat));
        }
        if self.is_over() {
            return Err(GameError::AlreadyOver);
        }
        if seat != self.turn {
            return Err(GameError::NotYourTurn(seat));
        }

        let mv: Move = serde_json::from_value(action)?;
        if mv.cell >= self.board.len() {
            return Err(GameError::InvalidAction(format!(
                "cell {} is off the board",
                mv.cell
            )));
        }
        if self.board[mv.cell].is_some() {
            return Err(GameError::InvalidAction(format!(
                "cell {} is already taken",
                mv.cell
            )));
        }

        self.board[mv.cell] = Some(Self::mark_for(seat));
        self.moves += 1;
        self.winner = self.winning_seat();
        if !self.is_over() {
            self.turn = 1 - self.turn;
        }

        if self.is_over() {
            Ok(GameProgress::Over)
        } else {
            Ok(GameProgress::Continue)
        }
    }

    fn state(&self) -> serde_json::Value {
        json!({
            "board": self.board,
            "turn": self.turn,
            "winner": self.winner,
            "over": self.is_over(),
        })
    }
}
