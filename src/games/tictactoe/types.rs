//! Core domain types for tic-tac-toe.

use super::cell::Cell;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
pub enum Player {
    /// Player X (goes first, minimizes).
    X,
    /// Player O (goes second, maximizes).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns true for the side that picks the greatest successor value.
    pub fn is_maximizing(self) -> bool {
        matches!(self, Player::O)
    }

    /// The mark this player writes on the board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Symbol used in the compact board encoding.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a single encoding symbol. `.` and `_` are accepted as blanks.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            ' ' | '.' | '_' => Some(Square::Empty),
            'X' | 'x' => Some(Square::Occupied(Player::X)),
            'O' | 'o' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

/// Error parsing a board from its 9-character encoding.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// The encoding did not contain exactly nine cells.
    #[display("Board must have 9 cells, found {}", _0)]
    WrongLength(usize),
    /// A cell symbol was not blank, X or O.
    #[display("Invalid cell symbol {:?} at index {}", symbol, index)]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Cell index of the offending character.
        index: usize,
    },
}

impl std::error::Error for BoardParseError {}

/// 3x3 tic-tac-toe board.
///
/// Serialized as its compact encoding: nine characters in row-major order,
/// `' '` for empty, `'X'` and `'O'` for marks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.squares[cell.to_index()]
    }

    /// Sets the square at the given cell.
    pub(crate) fn set(&mut self, cell: Cell, square: Square) {
        self.squares[cell.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Compact 9-character encoding used as the memo key.
    pub fn encode(&self) -> String {
        self.squares.iter().map(|s| s.symbol()).collect()
    }

    /// Formats the board as a human-readable grid, numbering empty squares 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => char::from(b'1' + pos as u8),
                    Square::Occupied(player) => player.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.encode())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            board.squares[index] = Square::from_symbol(symbol)
                .ok_or(BoardParseError::InvalidSymbol { symbol, index })?;
        }
        Ok(board)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}

impl TryFrom<String> for Board {
    type Error = BoardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}
