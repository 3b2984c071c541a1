//! Tests for the tic-tac-toe position model.

use strictly_minimax::{Board, Cell, MoveError, Player, Position, Square};

fn pos(s: &str) -> Position {
    Position::from_board(s.parse().expect("valid board")).expect("reachable counts")
}

#[test]
fn test_empty_cells_on_empty_board() {
    let p = Position::new();
    assert_eq!(p.empty_cells(), Cell::ALL.to_vec());
}

#[test]
fn test_empty_cells_filters_occupied() {
    let p = pos("X   O    ");
    let empty = p.empty_cells();
    assert_eq!(empty.len(), 7);
    assert!(!empty.contains(&Cell::TopLeft));
    assert!(!empty.contains(&Cell::Center));
    assert!(empty.contains(&Cell::BottomRight));
}

#[test]
fn test_apply_move_changes_one_cell_and_flips_turn() {
    let before = pos("X   O    ");
    let after = before.apply_move(Cell::BottomRight).expect("empty cell");

    assert_eq!(after.to_move(), Player::O);
    assert_eq!(after.board().get(Cell::BottomRight), Square::Occupied(Player::X));
    let changed: Vec<Cell> = Cell::ALL
        .into_iter()
        .filter(|&c| before.board().get(c) != after.board().get(c))
        .collect();
    assert_eq!(changed, vec![Cell::BottomRight]);

    // The starting position is untouched.
    assert_eq!(before, pos("X   O    "));
    assert_eq!(before.to_move(), Player::X);
}

#[test]
fn test_apply_move_on_occupied_cell_fails() {
    let p = pos("X   O    ");
    assert_eq!(
        p.apply_move(Cell::Center),
        Err(MoveError::SquareOccupied(Cell::Center))
    );
    assert_eq!(p.apply_index(0), Err(MoveError::SquareOccupied(Cell::TopLeft)));
    assert_eq!(p, pos("X   O    "));
}

#[test]
fn test_row_win_detected_only_after_move() {
    // X holds 0 and 1 and is to move; 2 completes the top row.
    let p = pos("XX OO    ");
    assert_eq!(p.to_move(), Player::X);
    assert!(!p.is_winner(Player::X));
    assert!(!p.is_terminal());

    let won = p.apply_move(Cell::TopRight).expect("empty cell");
    assert!(won.is_winner(Player::X));
    assert!(!won.is_winner(Player::O));
    assert!(won.is_terminal());
}

#[test]
fn test_column_and_diagonal_wins() {
    // X holds the right column.
    let column = pos("O X OX OX");
    assert!(column.is_winner(Player::X));
    assert!(!column.is_winner(Player::O));

    let diagonal = pos("OXX O X O");
    assert!(diagonal.is_winner(Player::O));
    assert!(!diagonal.is_winner(Player::X));
}

#[test]
fn test_full_board_without_line_is_terminal_draw() {
    let p = pos("XOXOXXOXO");
    assert!(p.is_terminal());
    assert!(!p.is_winner(Player::X));
    assert!(!p.is_winner(Player::O));
    assert!(p.children().is_empty());
    assert_eq!(p.terminal_value(), 0);
}

#[test]
fn test_children_one_per_empty_cell_in_order() {
    let p = pos("X   O    ");
    let children = p.children();
    assert_eq!(children.len(), 7);
    for (child, cell) in children.iter().zip(p.empty_cells()) {
        assert_eq!(child.board().get(cell), Square::Occupied(Player::X));
        assert_eq!(child.to_move(), Player::O);
    }
}

#[test]
fn test_from_board_rejects_o_first() {
    let board: Board = "O        ".parse().expect("valid board");
    assert!(Position::from_board(board).is_err());
}

#[test]
fn test_deserialized_position_keeps_derived_turn() {
    let p: Position = serde_json::from_str(r#""X        ""#).expect("reachable board");
    assert_eq!(p.to_move(), Player::O);
    let next = p.apply_move(Cell::Center).expect("empty");
    assert_eq!(next.to_move(), Player::X);
}

#[test]
fn test_deserializing_a_forced_turn_fails() {
    let forced = r#"{"board":"         ","to_move":"O"}"#;
    assert!(serde_json::from_str::<Position>(forced).is_err());
    assert!(serde_json::from_str::<Position>(r#""XX       ""#).is_err());
}
