//! Moves of the blank cell.
//!
//! A move names the direction the blank travels, not the tile. Every move
//! has an inverse, so the move graph is undirected.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseMoveError;
use crate::grid::{idx_to_cell, SIDE};

/// A direction the blank travels: one step up, down, left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four moves, in the order legal moves are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Change of the blank's flat index when it travels this way.
    pub const fn delta(self) -> isize {
        match self {
            Move::Up => -(SIDE as isize),
            Move::Down => SIDE as isize,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Whether a blank at `blank_index` stays on the grid after this move.
    #[inline]
    pub const fn allowed_from(self, blank_index: usize) -> bool {
        let (row, col) = idx_to_cell(blank_index);
        match self {
            Move::Up => row > 0,
            Move::Down => row < SIDE - 1,
            Move::Left => col > 0,
            Move::Right => col < SIDE - 1,
        }
    }

    /// Lowercase name, as printed and parsed by the CLI.
    pub const fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts full names or their first letter, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}
