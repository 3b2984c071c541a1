//! Strictly Minimax - tic-tac-toe solved by exhaustive enumeration
//!
//! Every position reachable from the empty board is enumerated once, scored
//! under minimax, and stored with its best move. Play-time move selection
//! is a table lookup.
//!
//! # Architecture
//!
//! - **Games**: immutable positions and pure rules
//! - **Search**: heuristic evaluation and alpha-beta minimax
//! - **Memo**: full game-tree enumeration, lookup, persistence
//! - **Engine**: the move-request interface over a loaded table
//!
//! # Example
//!
//! ```
//! use strictly_minimax::{Cell, Engine, MemoTable, Position};
//!
//! let engine = Engine::from_table(MemoTable::build());
//! let exchange = engine.respond(&Position::new(), Cell::Center).unwrap();
//! let (reply, _) = exchange.reply.unwrap();
//! assert!(reply.cell().is_corner());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod games;
mod memo;
mod search;

// Crate-level exports - Configuration
pub use config::{ConfigError, SolverConfig};

// Crate-level exports - Play-time engine
pub use engine::{Engine, Exchange, RespondError};

// Crate-level exports - Memo table
pub use memo::{
    BoardKey, EntryDecodeError, LookupError, MemoEntry, MemoStore, MemoTable, REACHABLE_POSITIONS,
    ResolveError, StoreError, TableSummary, resolve_move, resolve_move_with_depth,
};

// Crate-level exports - Search
pub use search::{
    CENTER_BONUS, CORNER_BONUS, DEFAULT_DEPTH, INF, LINE_WEIGHT, SearchOutcome, WIN_SCORE,
    best_move, heuristic, minimax,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardParseError, Cell, GameStatus, Move, MoveError, Player, Position, PositionError,
    Square, rules,
};
