//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{Cell, Player};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell where the player places their mark.
    pub cell: Cell,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the cell of this move.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell.label())
    }
}

/// Error that can occur when applying a move.
///
/// A rejected move leaves the caller's position untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the cell is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Cell),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The index does not name a cell on the board.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),
}

impl std::error::Error for MoveError {}
