//! Static evaluation of tic-tac-toe positions.
//!
//! Decided positions score `±WIN_SCORE` (positive when O has won) and drawn
//! ones score 0. Undecided positions get a linear positional estimate:
//! open lines, center control, corner control.

use crate::games::tictactoe::rules::LINES;
use crate::games::tictactoe::{Cell, Player, Position, Square};

/// Score of a position won by O. X wins score the negation.
pub const WIN_SCORE: i32 = 1000;

/// Per-mark weight of a line held by only one side.
pub const LINE_WEIGHT: i32 = 10;

/// Bonus for holding the center.
pub const CENTER_BONUS: i32 = 3;

/// Bonus per held corner.
pub const CORNER_BONUS: i32 = 2;

/// Evaluates a position from O's (the maximizer's) point of view.
pub fn heuristic(pos: &Position) -> i32 {
    if pos.is_winner(Player::O) {
        return WIN_SCORE;
    }
    if pos.is_winner(Player::X) {
        return -WIN_SCORE;
    }
    if pos.is_terminal() {
        return 0;
    }

    let board = pos.board();
    let mut score = 0;

    for line in &LINES {
        let o_count = count_in_line(line, pos, Player::O);
        let x_count = count_in_line(line, pos, Player::X);

        if x_count == 0 {
            score += LINE_WEIGHT * o_count;
        } else if o_count == 0 {
            score -= LINE_WEIGHT * x_count;
        }
    }

    score += side_sign(board.get(Cell::Center)) * CENTER_BONUS;
    for corner in Cell::CORNERS {
        score += side_sign(board.get(corner)) * CORNER_BONUS;
    }

    score
}

fn count_in_line(line: &[Cell; 3], pos: &Position, player: Player) -> i32 {
    line.iter()
        .filter(|&&cell| pos.board().get(cell) == Square::Occupied(player))
        .count() as i32
}

// +1 for O, -1 for X, 0 for empty.
fn side_sign(square: Square) -> i32 {
    match square {
        Square::Occupied(Player::O) => 1,
        Square::Occupied(Player::X) => -1,
        Square::Empty => 0,
    }
}
