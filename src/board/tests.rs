use super::*;
use crate::error::EngineError;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::center();
    assert_eq!(pos, Pos::new(7, 7));
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(Pos::from_index(112), pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(15, 0));
    assert!(!Pos::is_valid(0, 15));
    assert!(Pos::try_new(3, 15).is_err());
}

#[test]
fn test_pos_parse() {
    assert_eq!("7,8".parse::<Pos>(), Ok(Pos::new(7, 8)));
    assert_eq!(" 0 , 14 ".parse::<Pos>(), Ok(Pos::new(0, 14)));
    assert!(matches!("7".parse::<Pos>(), Err(EngineError::InvalidArgument(_))));
    assert!(matches!("15,0".parse::<Pos>(), Err(EngineError::InvalidMove { .. })));
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_pos_corner_indices() {
    assert_eq!(Pos::new(0, 0).to_index(), 0);
    assert_eq!(Pos::new(0, 14).to_index(), 14);
    assert_eq!(Pos::new(14, 0).to_index(), 210);
    assert_eq!(Pos::new(14, 14).to_index(), 224);
}

#[test]
fn test_place_and_query() {
    let mut board = Board::new();
    board.place(Pos::new(3, 4), Stone::White).unwrap();
    assert_eq!(board.get(Pos::new(3, 4)), Stone::White);
    assert!(!board.is_empty(Pos::new(3, 4)));
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_place_occupied_fails() {
    let mut board = Board::new();
    board.place(Pos::new(7, 7), Stone::Black).unwrap();
    let err = board.place(Pos::new(7, 7), Stone::White).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMove { row: 7, col: 7, .. }));
    assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
}

#[test]
fn test_place_out_of_range_fails() {
    let mut board = Board::new();
    let off = Pos { row: 15, col: 2 };
    assert!(matches!(
        board.place(off, Stone::Black),
        Err(EngineError::InvalidMove { .. })
    ));
    assert!(board.is_board_empty());
}

#[test]
fn test_query_off_board_does_not_panic() {
    let mut board = Board::new();
    board.place(Pos::new(1, 5), Stone::Black).unwrap();

    let far = Pos { row: 20, col: 0 };
    assert_eq!(board.get(far), Stone::Empty);
    assert!(!board.is_empty(far));
    // Column 20 of row 0 would alias (1, 5) by index
    let aliased = Pos { row: 0, col: 20 };
    assert_eq!(aliased.to_index(), Pos::new(1, 5).to_index());
    assert_eq!(board.get(aliased), Stone::Empty);
    assert!(!board.is_empty(aliased));
}

#[test]
fn test_pos_deserialize_validates() {
    let pos: Pos = serde_json::from_str(r#"{"row":3,"col":14}"#).unwrap();
    assert_eq!(pos, Pos::new(3, 14));
    assert_eq!(serde_json::to_string(&pos).unwrap(), r#"{"row":3,"col":14}"#);

    assert!(serde_json::from_str::<Pos>(r#"{"row":20,"col":0}"#).is_err());
    assert!(serde_json::from_str::<Pos>(r#"{"row":0,"col":15}"#).is_err());
    assert!(serde_json::from_str::<Pos>(r#"{"row":-1,"col":4}"#).is_err());
}

#[test]
fn test_place_empty_stone_fails() {
    let mut board = Board::new();
    assert!(matches!(
        board.place(Pos::new(1, 1), Stone::Empty),
        Err(EngineError::InvalidArgument(_))
    ));
}

#[test]
fn test_remove_restores_bit_identical() {
    let mut board = Board::from_moves(&[Pos::new(7, 7), Pos::new(7, 8), Pos::new(8, 8)]).unwrap();
    let before = board.clone();
    for pos in before.empty_cells().collect::<Vec<_>>() {
        board.place(pos, Stone::White).unwrap();
        board.remove(pos).unwrap();
        assert_eq!(board, before);
    }
}

#[test]
fn test_remove_empty_fails() {
    let mut board = Board::new();
    assert!(board.remove(Pos::new(2, 2)).is_err());
}

#[test]
fn test_neighbor_within() {
    let mut board = Board::new();
    board.place(Pos::new(7, 7), Stone::Black).unwrap();

    assert!(board.has_neighbor_within(Pos::new(9, 9), 2));
    assert!(board.has_neighbor_within(Pos::new(5, 8), 2));
    assert!(!board.has_neighbor_within(Pos::new(10, 7), 2));
    assert!(board.has_neighbor_within(Pos::new(10, 7), 3));
    // The cell itself does not count
    assert!(!board.has_neighbor_within(Pos::new(7, 7), 2));
}

#[test]
fn test_side_to_move_and_full() {
    let mut board = Board::new();
    assert_eq!(board.side_to_move(), Stone::Black);
    board.place(Pos::new(0, 0), Stone::Black).unwrap();
    assert_eq!(board.side_to_move(), Stone::White);
    assert!(!board.is_full());

    let mut color = Stone::White;
    for pos in board.empty_cells().collect::<Vec<_>>() {
        board.place(pos, color).unwrap();
        color = color.opponent();
    }
    assert!(board.is_full());
    assert_eq!(board.empty_cells().count(), 0);
}

#[test]
fn test_display_marks() {
    let board = Board::from_moves(&[Pos::new(0, 0), Pos::new(0, 1)]).unwrap();
    let text = board.to_string();
    let first_row = text.lines().nth(1).unwrap();
    assert!(first_row.trim_start().starts_with("0  X  O  ."));
    assert_eq!(text.lines().count(), 16);
}
