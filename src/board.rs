//! Board configurations and the legal-move relation.
//!
//! A board is a permutation of tiles `0..=8` over the 3x3 grid, read
//! row-major, with 0 as the blank. Boards are immutable values: applying a
//! move returns a new board.

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, MoveError};
use crate::grid::{format_compact, format_grid, BoardKey, CELLS};
use crate::moves::Move;

/// Tile value used for the blank cell.
pub const BLANK: u8 = 0;

/// The solved configuration: tiles 1-8 in order, blank last.
pub const GOAL_CELLS: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, BLANK];

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    cells: [u8; CELLS],
    /// Index of the blank in `cells`, cached since every move needs it.
    blank: u8,
}

impl Board {
    pub const GOAL: Board = Board {
        cells: GOAL_CELLS,
        blank: (CELLS - 1) as u8,
    };

    /// Creates a board, checking that `cells` is a permutation of `0..=8`.
    pub fn new(cells: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = 0u16;
        let mut blank = 0;

        for (cell_index, &value) in cells.iter().enumerate() {
            if value as usize >= CELLS {
                return Err(BoardError::OutOfRange { value });
            }
            if seen & (1 << value) != 0 {
                return Err(BoardError::Duplicate { value });
            }
            seen |= 1 << value;
            if value == BLANK {
                blank = cell_index as u8;
            }
        }

        // nine distinct values below nine cover the whole range, so the
        // blank is always present here
        Ok(Self { cells, blank })
    }

    /// Creates a board from a slice of any length, rejecting anything but 9 cells.
    pub fn from_slice(cells: &[u8]) -> Result<Self, BoardError> {
        let cells: [u8; CELLS] = cells.try_into().map_err(|_| BoardError::WrongLength {
            expected: CELLS,
            actual: cells.len(),
        })?;
        Self::new(cells)
    }

    /// Rebuilds a board from a key produced by [`Board::key`].
    pub(crate) fn from_key(key: BoardKey) -> Self {
        let cells = key.unpack();
        let blank = cells.iter().position(|&tile| tile == BLANK).unwrap_or(0) as u8;
        Self { cells, blank }
    }

    #[inline]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    #[inline]
    pub fn key(&self) -> BoardKey {
        BoardKey::pack(&self.cells)
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    /// Moves that keep the blank on the grid, in the order up, down, left, right.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> {
        let blank = self.blank_index();
        Move::ALL.into_iter().filter(move |mv| mv.allowed_from(blank))
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        mv.allowed_from(self.blank_index())
    }

    /// Applies `mv`, or returns `None` if it would move the blank off the grid.
    #[inline]
    pub fn try_apply(&self, mv: Move) -> Option<Board> {
        if !self.is_legal(mv) {
            return None;
        }

        let blank = self.blank_index();
        let target = (blank as isize + mv.delta()) as usize;
        let mut cells = self.cells;
        cells.swap(blank, target);

        Some(Board {
            cells,
            blank: target as u8,
        })
    }

    /// Applies a legal move.
    ///
    /// # Panics
    ///
    /// Panics if `mv` is not in [`Board::legal_moves`]. Callers holding an
    /// untrusted move should use [`Board::try_apply`].
    #[inline]
    pub fn apply(&self, mv: Move) -> Board {
        match self.try_apply(mv) {
            Some(board) => board,
            None => panic!(
                "invalid argument: {mv} is not legal with the blank at index {}",
                self.blank
            ),
        }
    }

    /// Applies `moves` in order, stopping at the first illegal one.
    pub fn replay(&self, moves: &[Move]) -> Result<Board, MoveError> {
        moves
            .iter()
            .enumerate()
            .try_fold(*self, |board, (index, &mv)| {
                board.try_apply(mv).ok_or(MoveError { index, mv, board })
            })
    }

    /// Parity test for membership in the goal's reachable component.
    ///
    /// On a grid of odd width a move never changes the parity of the
    /// inversion count over the numbered tiles, and the goal has none, so a
    /// board is solvable exactly when its inversion count is even.
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<u8> = self
            .cells
            .iter()
            .copied()
            .filter(|&tile| tile != BLANK)
            .collect();

        let inversions: usize = tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| b < a).count())
            .sum();

        inversions % 2 == 0
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = BoardError;

    fn try_from(cells: &[u8]) -> Result<Self, Self::Error> {
        Board::from_slice(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grid(&self.cells))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", format_compact(&self.cells))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses `123456780`, `1,2,3,4,5,6,7,8,0` or `1 2 3 / 4 5 6 / 7 8 _`.
    ///
    /// Whitespace, commas and slashes separate cells; `_` and `.` stand for
    /// the blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELLS);
        for ch in s.chars() {
            match ch {
                c if c.is_whitespace() => {}
                ',' | '/' => {}
                '_' | '.' => cells.push(BLANK),
                c => {
                    let digit = c.to_digit(10).ok_or(BoardError::InvalidChar { ch: c })?;
                    cells.push(digit as u8);
                }
            }
        }
        Board::from_slice(&cells)
    }
}
