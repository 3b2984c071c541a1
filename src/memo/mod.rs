//! Exhaustive enumeration and memoization of the game tree.
//!
//! [`MemoTable::build`] walks every position reachable from the empty board
//! and records its minimax value and best move. [`resolve_move`] answers
//! from the table, and [`MemoStore`] persists it between runs.

mod entry;
mod resolve;
mod store;
mod table;

pub use entry::{EntryDecodeError, MemoEntry};
pub use resolve::{ResolveError, resolve_move, resolve_move_with_depth};
pub use store::{MemoStore, StoreError};
pub use table::{BoardKey, LookupError, MemoTable, REACHABLE_POSITIONS, TableSummary};
