//! Immutable game positions: a board plus the side to move.
//!
//! The side to move is never set independently. It is derived from the
//! mark counts whenever a position is built from a bare board, and flipped
//! by [`Position::apply_move`]. Memo keys drop the turn for that reason.

use super::action::{Move, MoveError};
use super::rules;
use super::types::{Board, GameStatus, Player, Square};
use super::Cell;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A board whose mark counts cannot arise from legal play.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Impossible position: {} X marks vs {} O marks", x_count, o_count)]
pub struct PositionError {
    /// Number of X marks on the board.
    pub x_count: usize,
    /// Number of O marks on the board.
    pub o_count: usize,
}

impl std::error::Error for PositionError {}

/// Full game state: board and side to move.
///
/// Serialized as its board alone; deserializing derives the turn and rejects
/// impossible boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Board", try_from = "Board")]
pub struct Position {
    board: Board,
    to_move: Player,
}

impl Position {
    /// The starting position: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
        }
    }

    /// Builds a position from a bare board, deriving the side to move.
    ///
    /// X moves when both sides have placed the same number of marks, O when
    /// X is one ahead. Any other difference is rejected.
    pub fn from_board(board: Board) -> Result<Self, PositionError> {
        let to_move = derive_turn(&board)?;
        Ok(Self { board, to_move })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// All cells currently blank, in increasing index order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::valid_moves(&self.board)
    }

    /// Places the mover's mark in `cell`, returning the successor position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SquareOccupied`] if the cell is not empty; `self`
    /// is left as it was.
    pub fn apply_move(&self, cell: Cell) -> Result<Position, MoveError> {
        if !self.board.is_empty(cell) {
            return Err(MoveError::SquareOccupied(cell));
        }

        let mut board = self.board;
        board.set(cell, Square::Occupied(self.to_move));
        let next = Position {
            board,
            to_move: self.to_move.opponent(),
        };
        debug_assert_eq!(derive_turn(&next.board).ok(), Some(next.to_move));
        Ok(next)
    }

    /// Like [`Position::apply_move`], taking a raw 0-8 index.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for indices past the board, or
    /// [`MoveError::SquareOccupied`] for a filled cell.
    pub fn apply_index(&self, index: usize) -> Result<Position, MoveError> {
        let cell = Cell::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.apply_move(cell)
    }

    /// The move that leads from `self` to `next`, if `next` is a child.
    pub fn move_to(&self, next: &Position) -> Option<Move> {
        let mut changed = Cell::ALL
            .into_iter()
            .filter(|&cell| self.board.get(cell) != next.board.get(cell));
        let cell = changed.next()?;
        if changed.next().is_some() || !self.board.is_empty(cell) {
            return None;
        }
        (next.board.get(cell) == Square::Occupied(self.to_move))
            .then(|| Move::new(self.to_move, cell))
    }

    /// True iff any of the 8 lines is fully occupied by `player`.
    pub fn is_winner(&self, player: Player) -> bool {
        rules::is_winner(&self.board, player)
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(&self.board)
    }

    /// True iff either mark has won or no empty cells remain.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || rules::is_full(&self.board)
    }

    /// Current status of the game at this position.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(player) => GameStatus::Won(player),
            None if rules::is_full(&self.board) => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// One child per empty cell, in increasing cell index order.
    ///
    /// Memo entries store best moves as an index into this sequence, so the
    /// order must stay stable.
    pub fn children(&self) -> Vec<Position> {
        self.empty_cells()
            .into_iter()
            .filter_map(|cell| self.apply_move(cell).ok())
            .collect()
    }

    /// Ground-truth outcome: +1 if O (the maximizer) won, -1 if X won, else 0.
    pub fn terminal_value(&self) -> i32 {
        match self.winner() {
            Some(Player::O) => 1,
            Some(Player::X) => -1,
            None => 0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} to move", self.board, self.to_move)
    }
}

impl TryFrom<Board> for Position {
    type Error = PositionError;

    fn try_from(board: Board) -> Result<Self, Self::Error> {
        Self::from_board(board)
    }
}

impl From<Position> for Board {
    fn from(pos: Position) -> Self {
        pos.board
    }
}

fn derive_turn(board: &Board) -> Result<Player, PositionError> {
    let x_count = board.count(Player::X);
    let o_count = board.count(Player::O);
    if x_count == o_count {
        Ok(Player::X)
    } else if x_count == o_count + 1 {
        Ok(Player::O)
    } else {
        Err(PositionError { x_count, o_count })
    }
}
