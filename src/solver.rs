//! Breadth-first cost propagation from the goal board.
//!
//! Key points:
//! - Every move is reversible and costs one, so a single FIFO sweep from the
//!   goal settles each reachable board at its true distance the first time
//!   it is discovered. Nothing is ever relaxed or revisited.
//! - Boards are keyed by their packed `BoardKey` in an `FxHashMap`.
//! - Only boards reachable from the goal are ever materialized (half of
//!   the 9! permutations).

use std::collections::hash_map::Entry as Slot;
use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::Board;
use crate::grid::BoardKey;
use crate::moves::Move;

/// Number of boards in the goal's reachable component (9! / 2).
pub const REACHABLE_STATES: usize = 181_440;

/// What the map knows about one settled board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Minimum number of moves from this board to the goal.
    pub distance: u8,
    /// The move that produced this board from its goal-ward neighbour.
    ///
    /// `None` only for the goal itself. Heading back toward the goal means
    /// applying the inverse of this move, see [`Entry::toward_goal`].
    pub reached_by: Option<Move>,
}

impl Entry {
    /// The move that takes this board one step closer to the goal.
    #[inline]
    pub fn toward_goal(&self) -> Option<Move> {
        self.reached_by.map(Move::inverse)
    }
}

/// Distance and policy for every board reachable from the goal.
///
/// Produced by [`propagate`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DistanceMap {
    entries: FxHashMap<BoardKey, Entry>,
}

impl DistanceMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entry(&self, board: &Board) -> Option<Entry> {
        self.entries.get(&board.key()).copied()
    }

    #[inline]
    pub fn contains(&self, board: &Board) -> bool {
        self.entries.contains_key(&board.key())
    }

    /// Distance to the goal, or `None` if the board is unreachable.
    #[inline]
    pub fn distance(&self, board: &Board) -> Option<u8> {
        self.entry(board).map(|entry| entry.distance)
    }

    /// Policy lookup: the next move on a shortest path to the goal.
    ///
    /// `None` for the goal and for unreachable boards.
    #[inline]
    pub fn toward_goal(&self, board: &Board) -> Option<Move> {
        self.entry(board).and_then(|entry| entry.toward_goal())
    }

    pub fn max_distance(&self) -> u8 {
        self.entries
            .values()
            .map(|entry| entry.distance)
            .max()
            .unwrap_or(0)
    }

    /// Number of boards at each distance, indexed by distance.
    pub fn histogram(&self) -> Vec<usize> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let mut counts = vec![0usize; self.max_distance() as usize + 1];
        for entry in self.entries.values() {
            counts[entry.distance as usize] += 1;
        }
        counts
    }

    /// All boards at exactly `distance`, ordered by key.
    pub fn boards_at(&self, distance: u8) -> Vec<Board> {
        let mut keys: Vec<BoardKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.distance == distance)
            .map(|(&key, _)| key)
            .collect();
        keys.sort_unstable();
        keys.into_iter().map(Board::from_key).collect()
    }

    /// Iterates over every settled board, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Board, Entry)> + '_ {
        self.entries
            .iter()
            .map(|(&key, &entry)| (Board::from_key(key), entry))
    }
}

impl FromIterator<(Board, Entry)> for DistanceMap {
    /// Builds a map from precomputed entries. Later duplicates win.
    fn from_iter<I: IntoIterator<Item = (Board, Entry)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(board, entry)| (board.key(), entry))
                .collect(),
        }
    }
}

/// Computes the distance to the goal of every board reachable from it.
///
/// Boards are settled in non-decreasing distance order because the work
/// queue is strictly first-in-first-out. A board's entry is written once,
/// when it is first discovered, and never changed.
pub fn propagate() -> DistanceMap {
    let started = Instant::now();

    let mut entries: FxHashMap<BoardKey, Entry> =
        FxHashMap::with_capacity_and_hasher(REACHABLE_STATES, Default::default());
    entries.insert(
        Board::GOAL.key(),
        Entry {
            distance: 0,
            reached_by: None,
        },
    );

    let mut work_queue = VecDeque::with_capacity(REACHABLE_STATES / 8);
    work_queue.push_back((Board::GOAL, 0u8));

    while let Some((board, distance)) = work_queue.pop_front() {
        for mv in board.legal_moves() {
            let next = board.apply(mv);

            // already settled at a distance no greater than ours
            if let Slot::Vacant(slot) = entries.entry(next.key()) {
                slot.insert(Entry {
                    distance: distance + 1,
                    reached_by: Some(mv),
                });
                work_queue.push_back((next, distance + 1));
            }
        }
    }

    let map = DistanceMap { entries };
    debug!(
        states = map.len(),
        max_distance = map.max_distance(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "propagated distances from goal"
    );
    map
}

/// One map shared by every test in the crate; building it dominates test time.
#[cfg(test)]
pub(crate) fn shared_map() -> &'static DistanceMap {
    use std::sync::OnceLock;

    static MAP: OnceLock<DistanceMap> = OnceLock::new();
    MAP.get_or_init(propagate)
}
