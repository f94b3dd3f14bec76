use super::*;

fn at(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn san_of(fen: &str, mv: Move) -> String {
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.clone();
    let s = san(&mut pos, mv);
    assert_eq!(pos, before, "san must not change the position");
    s
}

#[test]
fn test_pawn_and_piece_moves() {
    let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    assert_eq!(san_of(start, Move::new(at("e2"), at("e4"))), "e4");
    assert_eq!(san_of(start, Move::new(at("g1"), at("f3"))), "Nf3");
}

#[test]
fn test_captures() {
    let fen = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("e4"), at("d5"))), "exd5");
    let fen = "4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("d1"), at("d5"))), "Qxd5");
    let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
    assert_eq!(san_of(fen, Move::en_passant(at("e5"), at("d6"))), "exd6");
}

#[test]
fn test_disambiguation() {
    // Knights on b1 and f1 can both reach d2: file letter.
    let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("b1"), at("d2"))), "Nbd2");
    // Rooks on a1 and a5 share a file: rank digit.
    let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("a1"), at("a3"))), "R1a3");
    // Queens on e4, h4 and h1 all reach e1: full square.
    let fen = "8/8/k7/8/4Q2Q/8/8/K6Q w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("h4"), at("e1"))), "Qh4e1");
}

#[test]
fn test_castling_and_promotion() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_eq!(san_of(fen, Move::castle(at("e1"), at("g1"))), "O-O");
    assert_eq!(san_of(fen, Move::castle(at("e1"), at("c1"))), "O-O-O");
    let fen = "8/P6k/8/8/8/8/8/4K3 w - - 0 1";
    assert_eq!(
        san_of(fen, Move::promotion(at("a7"), at("a8"), PieceKind::Knight)),
        "a8=N"
    );
}

#[test]
fn test_check_and_mate_suffix() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("a1"), at("a8"))), "Ra8#");
    let fen = "6k1/8/8/8/8/8/8/R5K1 w - - 0 1";
    assert_eq!(san_of(fen, Move::new(at("a1"), at("a8"))), "Ra8+");
}
