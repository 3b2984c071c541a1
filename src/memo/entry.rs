//! Memo table values.

use serde::{Deserialize, Serialize};

/// Precomputed result for one position.
///
/// On disk an entry is the pair `(score, best_move_index)`, with `-1`
/// standing for "no move". In memory the two cases are separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(i32, i8)", try_from = "(i32, i8)")]
pub enum MemoEntry {
    /// No move to play: the position is terminal, or enumeration stopped here
    /// on its depth budget.
    Leaf {
        /// Heuristic value of the position.
        score: i32,
    },
    /// Interior position with a recommended move.
    Branch {
        /// Minimax value of the position.
        score: i32,
        /// Index into [`Position::children`](crate::Position::children).
        best_child: u8,
    },
}

impl MemoEntry {
    /// Value of the position, positive when O is winning.
    pub fn score(&self) -> i32 {
        match *self {
            MemoEntry::Leaf { score } | MemoEntry::Branch { score, .. } => score,
        }
    }

    /// Index of the recommended child, if there is one.
    pub fn best_child(&self) -> Option<usize> {
        match *self {
            MemoEntry::Leaf { .. } => None,
            MemoEntry::Branch { best_child, .. } => Some(usize::from(best_child)),
        }
    }
}

/// A persisted best-move index outside `-1..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Invalid best-move index {} (expected -1 or 0-8)", _0)]
pub struct EntryDecodeError(pub i8);

impl std::error::Error for EntryDecodeError {}

impl From<MemoEntry> for (i32, i8) {
    fn from(entry: MemoEntry) -> Self {
        match entry {
            MemoEntry::Leaf { score } => (score, -1),
            MemoEntry::Branch { score, best_child } => (score, best_child as i8),
        }
    }
}

impl TryFrom<(i32, i8)> for MemoEntry {
    type Error = EntryDecodeError;

    fn try_from((score, index): (i32, i8)) -> Result<Self, Self::Error> {
        match index {
            -1 => Ok(MemoEntry::Leaf { score }),
            0..=8 => Ok(MemoEntry::Branch {
                score,
                best_child: index as u8,
            }),
            _ => Err(EntryDecodeError(index)),
        }
    }
}
