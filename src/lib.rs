//! Exact 8-puzzle solver.
//!
//! Computes the distance to the goal of every board reachable from it with a
//! single breadth-first sweep, then drives any solvable start board to the
//! goal along a shortest path.
//!
//! ```no_run
//! use eight_puzzle::{Move, Solution, Solver};
//!
//! let solver = Solver::new();
//! let solution = solver.solve_cells(&[1, 2, 3, 4, 5, 6, 0, 7, 8])?;
//! assert_eq!(solution, Solution::Moves(vec![Move::Right, Move::Right]));
//! # Ok::<(), eight_puzzle::SolveError>(())
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod moves;
pub mod path;
pub mod solver;

pub use board::Board;
pub use error::{BoardError, MoveError, Result, SolveError};
pub use moves::Move;
pub use path::Solution;
pub use solver::{DistanceMap, Entry};

/// Owns a distance map built once and answers queries against it.
///
/// The goal is fixed, so one `Solver` serves any number of start boards.
#[derive(Debug, Clone)]
pub struct Solver {
    map: DistanceMap,
}

impl Solver {
    /// Runs propagation from the goal. Takes a noticeable fraction of a
    /// second in debug builds.
    pub fn new() -> Self {
        Self::from_map(solver::propagate())
    }

    pub fn from_map(map: DistanceMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &DistanceMap {
        &self.map
    }

    pub fn solve(&self, start: &Board) -> Result<Solution> {
        path::reconstruct(&self.map, *start)
    }

    /// Validates `cells` as a board, then solves it.
    pub fn solve_cells(&self, cells: &[u8]) -> Result<Solution> {
        let start = Board::try_from(cells)?;
        self.solve(&start)
    }

    pub fn distance(&self, board: &Board) -> Option<u8> {
        self.map.distance(board)
    }

    /// The first move of a shortest path, `None` at the goal or when unsolvable.
    pub fn next_move(&self, board: &Board) -> Option<Move> {
        self.map.toward_goal(board)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot solve that builds a fresh distance map.
///
/// Callers solving more than one board should keep a [`Solver`] instead.
pub fn solve(cells: &[u8]) -> Result<Solution> {
    Solver::new().solve_cells(cells)
}
