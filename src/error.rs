//! Error types for board validation, move replay and solving.
//!
//! An unsolvable board is not an error: it is reported through
//! [`Solution::Unsolvable`](crate::path::Solution::Unsolvable).

use thiserror::Error;

use crate::board::Board;
use crate::grid::CELLS;
use crate::moves::Move;

pub type Result<T, E = SolveError> = std::result::Result<T, E>;

/// A start board that is not a permutation of `0..=8`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have {expected} cells, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("tile {value} is out of range 0..={max}", max = CELLS - 1)]
    OutOfRange { value: u8 },

    #[error("tile {value} appears more than once")]
    Duplicate { value: u8 },

    #[error("unexpected character {ch:?} in board")]
    InvalidChar { ch: char },
}

/// A move sequence that stops being legal part way through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move {index} ({mv}) is not legal on {board:?}")]
pub struct MoveError {
    /// Zero-based position of the offending move in the sequence.
    pub index: usize,
    pub mv: Move,
    /// The board the move was attempted on.
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move {0:?}, expected up, down, left or right")]
pub struct ParseMoveError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The map has no usable policy entry for a board on the path.
    #[error("distance map is inconsistent at {board:?}")]
    CorruptMap { board: Board },
}
