//! Value and search layer.
//!
//! Contains:
//! - Static evaluation of positions ([`heuristic`])
//! - Depth-bounded alpha-beta minimax ([`minimax`], [`best_move`])
//!
//! O is the maximizing side throughout: positive scores favor O.

pub mod heuristic;
pub mod minimax;

pub use heuristic::{CENTER_BONUS, CORNER_BONUS, LINE_WEIGHT, WIN_SCORE, heuristic};
pub use minimax::{DEFAULT_DEPTH, INF, SearchOutcome, best_move, minimax};
