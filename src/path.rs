//! Path reconstruction from a settled distance map.

use tracing::trace;

use crate::board::Board;
use crate::error::{Result, SolveError};
use crate::moves::Move;
use crate::solver::DistanceMap;

/// Outcome of solving one start board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// A shortest move sequence that turns the start board into the goal.
    Moves(Vec<Move>),
    /// The start board lies outside the goal's reachable component.
    Unsolvable,
}

impl Solution {
    pub fn moves(&self) -> Option<&[Move]> {
        match self {
            Solution::Moves(moves) => Some(moves),
            Solution::Unsolvable => None,
        }
    }

    pub fn is_solvable(&self) -> bool {
        matches!(self, Solution::Moves(_))
    }
}

/// Walks the policy from `start` until the goal is reached.
///
/// Each step looks up the current board's stored move and applies its
/// inverse. The result has exactly `distance(start)` moves.
pub fn reconstruct(map: &DistanceMap, start: Board) -> Result<Solution> {
    let Some(start_entry) = map.entry(&start) else {
        trace!(start = ?start, "start board is unreachable");
        return Ok(Solution::Unsolvable);
    };

    let expected_len = start_entry.distance as usize;
    let mut moves = Vec::with_capacity(expected_len);
    let mut current = start;

    while !current.is_goal() {
        let next = map
            .toward_goal(&current)
            .and_then(|step| current.try_apply(step).map(|board| (step, board)));

        // a well-formed map can never take more steps than the start distance
        let Some((step, board)) = next.filter(|_| moves.len() < expected_len) else {
            return Err(SolveError::CorruptMap { board: current });
        };

        moves.push(step);
        current = board;
    }

    trace!(start = ?start, moves = moves.len(), "reconstructed shortest path");
    Ok(Solution::Moves(moves))
}
