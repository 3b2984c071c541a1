//! Depth-bounded alpha-beta minimax.
//!
//! The search walks [`Position::children`] in order and keeps the **first**
//! child reaching the extremum (strict comparison), which is the same
//! tie-break the memo table uses. At the root with a full window the
//! returned value is exact, so cached and live answers agree.

use super::heuristic::{WIN_SCORE, heuristic};
use crate::games::tictactoe::Position;
use tracing::{debug, instrument};

/// Bound wider than any score the evaluator produces.
pub const INF: i32 = WIN_SCORE + 1;

/// Longest possible game; a search this deep always reaches terminal positions.
pub const DEFAULT_DEPTH: u8 = 9;

/// Result of a minimax search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Value of the searched position.
    pub value: i32,
    /// Best child, or the searched position itself at a leaf.
    pub best: Position,
}

/// Alpha-beta minimax over `pos`.
///
/// Depth 0 or a terminal position returns `heuristic(pos)` paired with `pos`.
/// Otherwise the maximizing side takes the greatest child value and the
/// minimizing side the least, pruning remaining siblings once `beta <= alpha`.
pub fn minimax(
    pos: &Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> SearchOutcome {
    if depth == 0 || pos.is_terminal() {
        return SearchOutcome {
            value: heuristic(pos),
            best: *pos,
        };
    }

    let mut best_value = if maximizing { -INF } else { INF };
    let mut best = *pos;

    for child in pos.children() {
        let value = minimax(&child, depth - 1, alpha, beta, !maximizing).value;

        if maximizing {
            if value > best_value {
                best_value = value;
                best = child;
            }
            alpha = alpha.max(value);
        } else {
            if value < best_value {
                best_value = value;
                best = child;
            }
            beta = beta.min(value);
        }

        if beta <= alpha {
            break;
        }
    }

    SearchOutcome {
        value: best_value,
        best,
    }
}

/// Best successor of `pos` found by a full-window search `depth` plies deep.
///
/// The side to move decides whether the root maximizes, so the answer is
/// right for either player. A terminal `pos` is returned unchanged.
#[instrument(skip(pos), fields(position = %pos))]
pub fn best_move(pos: &Position, depth: u8) -> Position {
    let outcome = minimax(pos, depth, -INF, INF, pos.to_move().is_maximizing());
    debug!(value = outcome.value, best = %outcome.best, "Search complete");
    outcome.best
}
