use super::*;

fn at(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

#[test]
fn test_pawn_attacks_are_diagonal_only() {
    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(at("d5"), Color::White));
    assert!(pos.is_square_attacked(at("f5"), Color::White));
    assert!(!pos.is_square_attacked(at("e5"), Color::White));
    // Black pawns attack downward.
    let pos = Position::from_fen("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(at("d4"), Color::Black));
    assert!(!pos.is_square_attacked(at("d6"), Color::Black));
}

#[test]
fn test_knight_attacks_from_corner() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(at("b3"), Color::White));
    assert!(pos.is_square_attacked(at("c2"), Color::White));
    assert!(!pos.is_square_attacked(at("b2"), Color::White));
}

#[test]
fn test_sliders_stop_at_blockers() {
    let pos = Position::from_fen("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(at("a3"), Color::White));
    assert!(pos.is_square_attacked(at("a4"), Color::White), "blocker square is attacked");
    assert!(!pos.is_square_attacked(at("a5"), Color::White));
    assert!(pos.is_square_attacked(at("d1"), Color::White));

    let pos = Position::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(at("h6"), Color::White));
    assert!(!pos.is_square_attacked(at("c2"), Color::White));
}

#[test]
fn test_contested_squares_after_e4_e5() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(at("e2"), at("e4")));
    pos.make_move(Move::new(at("e7"), at("e5")));
    assert!(pos.is_square_attacked(at("d5"), Color::White));
    assert!(pos.is_square_attacked(at("f5"), Color::White));
    assert!(pos.is_square_attacked(at("d4"), Color::Black));
    assert!(pos.is_square_attacked(at("f4"), Color::Black));
    // The bishops now see along the opened diagonals.
    assert!(pos.is_square_attacked(at("a6"), Color::White));
    assert!(pos.is_square_attacked(at("a3"), Color::Black));
    assert!(!pos.is_square_attacked(at("e5"), Color::White));
}

#[test]
fn test_in_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
    assert!(pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
}

#[test]
#[should_panic(expected = "king missing")]
fn test_in_check_without_king_panics() {
    let mut pos = Position::startpos();
    pos.set_piece(at("e1"), None);
    pos.in_check(Color::White);
}
