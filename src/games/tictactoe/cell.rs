//! Board cells, the unit of a move.

use super::types::Board;
use serde::{Deserialize, Serialize};

/// A cell on the tic-tac-toe board (0-8, row-major).
///
/// A move is the choice of one cell; it is legal only while that cell is
/// empty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Cell {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Cell {
    /// All 9 cells in index order.
    pub const ALL: [Cell; 9] = [
        Cell::TopLeft,
        Cell::TopCenter,
        Cell::TopRight,
        Cell::MiddleLeft,
        Cell::Center,
        Cell::MiddleRight,
        Cell::BottomLeft,
        Cell::BottomCenter,
        Cell::BottomRight,
    ];

    /// The four corner cells.
    pub const CORNERS: [Cell; 4] = [
        Cell::TopLeft,
        Cell::TopRight,
        Cell::BottomLeft,
        Cell::BottomRight,
    ];

    /// Get label for this cell (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Cell::TopLeft => "Top-left",
            Cell::TopCenter => "Top-center",
            Cell::TopRight => "Top-right",
            Cell::MiddleLeft => "Middle-left",
            Cell::Center => "Center",
            Cell::MiddleRight => "Middle-right",
            Cell::BottomLeft => "Bottom-left",
            Cell::BottomCenter => "Bottom-center",
            Cell::BottomRight => "Bottom-right",
        }
    }

    /// Parse from label or 1-based number (1-9), as typed by a human player.
    pub fn from_label_or_number(s: &str) -> Option<Cell> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        let s_lower = s.to_lowercase();
        if s_lower.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|cell| cell.label().to_lowercase() == s_lower)
    }

    /// Converts cell to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates cell from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns true for the four corners.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Returns true for the four edge (non-corner, non-center) cells.
    pub fn is_edge(self) -> bool {
        !self.is_corner() && self != Cell::Center
    }

    /// Filters cells by board state - returns only empty squares, in index order.
    pub fn valid_moves(board: &Board) -> Vec<Cell> {
        Self::ALL
            .iter()
            .copied()
            .filter(|cell| board.is_empty(*cell))
            .collect()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, cell) in Cell::iter().enumerate() {
            assert_eq!(cell.to_index(), i);
            assert_eq!(Cell::from_index(i), Some(cell));
        }
        assert_eq!(Cell::from_index(9), None);
    }

    #[test]
    fn test_from_label_or_number() {
        assert_eq!(Cell::from_label_or_number("1"), Some(Cell::TopLeft));
        assert_eq!(Cell::from_label_or_number(" 5 "), Some(Cell::Center));
        assert_eq!(Cell::from_label_or_number("9"), Some(Cell::BottomRight));
        assert_eq!(Cell::from_label_or_number("0"), None);
        assert_eq!(Cell::from_label_or_number("10"), None);
        assert_eq!(
            Cell::from_label_or_number("middle-right"),
            Some(Cell::MiddleRight)
        );
        assert_eq!(Cell::from_label_or_number(""), None);
    }

    #[test]
    fn test_corner_and_edge_classification() {
        assert!(Cell::TopLeft.is_corner());
        assert!(Cell::BottomRight.is_corner());
        assert!(!Cell::Center.is_corner());
        assert!(!Cell::Center.is_edge());
        assert!(Cell::TopCenter.is_edge());
        assert!(Cell::MiddleLeft.is_edge());
    }
}
