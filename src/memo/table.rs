//! The memo table and the enumeration that fills it.
//!
//! Enumeration is a post-order walk: a position's entry is written only
//! after every child has one, and the parent aggregates the scores already
//! written for its children instead of searching again. Nothing is pruned, so
//! every reachable board ends up keyed, whatever path reached it.

use super::entry::MemoEntry;
use crate::games::tictactoe::{Board, Position};
use crate::search::{DEFAULT_DEPTH, INF, heuristic};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Memo key. The side to move is implied by the mark counts, so the board
/// alone identifies a position.
pub type BoardKey = Board;

/// Number of distinct positions reachable from the empty board, terminal
/// positions included.
pub const REACHABLE_POSITIONS: usize = 5478;

/// A memo miss.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LookupError {
    /// No entry exists for the board.
    #[display("No memo entry for {}", _0)]
    NotFound(BoardKey),
}

impl std::error::Error for LookupError {}

/// Position counts by outcome under perfect play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Entries in the table.
    pub positions: usize,
    /// Entries with no move (finished games, or depth-limited leaves).
    pub leaves: usize,
    /// Positions O wins with best play.
    pub o_wins: usize,
    /// Positions that are drawn with best play.
    pub draws: usize,
    /// Positions X wins with best play.
    pub x_wins: usize,
}

/// Mapping from board to precomputed value and best move.
///
/// Written by [`MemoTable::enumerate`], read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoTable {
    entries: HashMap<BoardKey, MemoEntry>,
}

impl MemoTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerates the full game from the empty board.
    #[instrument]
    pub fn build() -> Self {
        let mut table = Self::new();
        table.enumerate(&Position::new(), DEFAULT_DEPTH);
        table
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no position has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the table holds exactly the positions reachable from the
    /// empty board, with a usable move for every unfinished one.
    pub fn is_complete(&self) -> bool {
        if self.len() != REACHABLE_POSITIONS {
            return false;
        }

        let mut seen = HashSet::new();
        let mut stack = vec![Position::new()];
        while let Some(pos) = stack.pop() {
            if !seen.insert(*pos.board()) {
                continue;
            }
            let Ok(entry) = self.lookup(&pos) else {
                debug!(missing = %pos, "Memo table incomplete");
                return false;
            };
            if pos.is_terminal() {
                continue;
            }
            let children = pos.children();
            if !entry.best_child().is_some_and(|i| i < children.len()) {
                debug!(position = %pos, "Memo entry has no usable move");
                return false;
            }
            stack.extend(children);
        }
        seen.len() == self.len()
    }

    /// Records the entry for `pos`, replacing any previous one.
    pub fn insert(&mut self, pos: &Position, entry: MemoEntry) {
        self.entries.insert(*pos.board(), entry);
    }

    /// Entry for `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if `pos` was never enumerated.
    pub fn lookup(&self, pos: &Position) -> Result<MemoEntry, LookupError> {
        self.entries
            .get(pos.board())
            .copied()
            .ok_or(LookupError::NotFound(*pos.board()))
    }

    /// Iterates over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&BoardKey, &MemoEntry)> {
        self.entries.iter()
    }

    /// Fills the table for `pos` and everything below it, up to
    /// `depth_budget` plies.
    ///
    /// Re-enumerating a subtree rewrites identical entries.
    #[instrument(skip(self, pos), fields(position = %pos))]
    pub fn enumerate(&mut self, pos: &Position, depth_budget: u8) {
        let before = self.len();
        let score = self.expand(pos, depth_budget);
        info!(
            score,
            entries = self.len(),
            added = self.len() - before,
            "Enumeration complete"
        );
    }

    // Post-order expansion; returns the score written for `pos`.
    fn expand(&mut self, pos: &Position, depth_budget: u8) -> i32 {
        if pos.is_terminal() || depth_budget == 0 {
            let score = heuristic(pos);
            self.insert(pos, MemoEntry::Leaf { score });
            return score;
        }

        let maximizing = pos.to_move().is_maximizing();
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_child = None;

        for (i, child) in pos.children().iter().enumerate() {
            // The score returned is the one just written for `child`.
            let child_score = self.expand(child, depth_budget - 1);

            let improves = if maximizing {
                child_score > best_score
            } else {
                child_score < best_score
            };
            if improves {
                best_score = child_score;
                best_child = Some(i as u8);
            }
        }

        // A non-terminal position has at least one child, and every child
        // score lies strictly inside (-INF, INF).
        let entry = match best_child {
            Some(best_child) => MemoEntry::Branch {
                score: best_score,
                best_child,
            },
            None => MemoEntry::Leaf { score: best_score },
        };
        self.insert(pos, entry);
        best_score
    }

    /// Follows recommended moves from `pos` until an entry has none.
    ///
    /// The returned line starts with `pos`. It stops early at the first
    /// position missing from the table.
    pub fn principal_line(&self, pos: &Position) -> Vec<Position> {
        let mut line = vec![*pos];
        let mut current = *pos;
        while let Ok(entry) = self.lookup(&current) {
            let Some(next) = entry
                .best_child()
                .and_then(|i| current.children().get(i).copied())
            else {
                break;
            };
            line.push(next);
            current = next;
        }
        debug!(start = %pos, plies = line.len() - 1, "Principal line");
        line
    }

    /// Counts entries by outcome.
    pub fn summary(&self) -> TableSummary {
        let mut summary = TableSummary {
            positions: self.len(),
            ..TableSummary::default()
        };
        for entry in self.entries.values() {
            if entry.best_child().is_none() {
                summary.leaves += 1;
            }
            match entry.score().signum() {
                1 => summary.o_wins += 1,
                -1 => summary.x_wins += 1,
                _ => summary.draws += 1,
            }
        }
        summary
    }
}

impl Serialize for MemoTable {
    // Sorted keys keep the persisted file byte-stable across runs.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&BoardKey, &MemoEntry> = self.entries.iter().collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MemoTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = HashMap::<BoardKey, MemoEntry>::deserialize(deserializer)?;
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::WIN_SCORE;

    fn pos(s: &str) -> Position {
        Position::from_board(s.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_terminal_position_is_leaf() {
        let mut table = MemoTable::new();
        let p = pos("XXXOO    ");
        table.enumerate(&p, DEFAULT_DEPTH);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(&p),
            Ok(MemoEntry::Leaf {
                score: -WIN_SCORE
            })
        );
    }

    #[test]
    fn test_zero_budget_stores_heuristic() {
        let mut table = MemoTable::new();
        let p = pos("    X    ");
        table.enumerate(&p, 0);
        assert_eq!(table.lookup(&p), Ok(MemoEntry::Leaf { score: -43 }));
    }

    #[test]
    fn test_one_ply_budget_picks_first_best_child() {
        // O to move; with one ply every child is scored by the heuristic.
        let mut table = MemoTable::new();
        let p = pos("    X    ");
        table.enumerate(&p, 1);
        assert_eq!(table.len(), 9);

        let children = p.children();
        let best = children
            .iter()
            .map(heuristic)
            .enumerate()
            .fold((0, -INF), |acc, (i, v)| if v > acc.1 { (i, v) } else { acc });
        let entry = table.lookup(&p).unwrap();
        assert_eq!(entry.best_child(), Some(best.0));
        assert_eq!(entry.score(), best.1);
    }

    #[test]
    fn test_moveless_entry_makes_table_incomplete() {
        let mut table = MemoTable::build();
        assert!(table.is_complete());
        table.insert(&Position::new(), MemoEntry::Leaf { score: 0 });
        assert_eq!(table.len(), REACHABLE_POSITIONS);
        assert!(!table.is_complete());
    }

    #[test]
    fn test_missing_position_is_not_found() {
        let table = MemoTable::new();
        let p = Position::new();
        assert_eq!(table.lookup(&p), Err(LookupError::NotFound(*p.board())));
    }

    #[test]
    fn test_summary_counts_leaves() {
        let mut table = MemoTable::new();
        table.enumerate(&pos("XXXOO    "), DEFAULT_DEPTH);
        table.enumerate(&pos("XOXOXXOXO"), DEFAULT_DEPTH);
        let summary = table.summary();
        assert_eq!(summary.positions, 2);
        assert_eq!(summary.leaves, 2);
        assert_eq!(summary.x_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.o_wins, 0);
    }
}
