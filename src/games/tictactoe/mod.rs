mod action;
mod cell;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use cell::Cell;
pub use position::{Position, PositionError};
pub use types::{Board, BoardParseError, GameStatus, Player, Square};
