//! Standard algebraic notation for display.

use crate::board::Position;
use crate::movegen::{has_legal_move, legal_moves_into};
use crate::types::*;

/// SAN for `mv`, which must be legal in `pos`.
///
/// Disambiguation is read from the board before the move, the `+`/`#` suffix
/// from the board after it. `pos` is left unchanged.
pub fn san(pos: &mut Position, mv: Move) -> String {
    let piece = pos
        .piece_at(mv.from)
        .unwrap_or_else(|| panic!("no piece on {}", sq_to_coord(mv.from)));

    let mut out = if mv.is_castle {
        if mv.to > mv.from { "O-O" } else { "O-O-O" }.to_string()
    } else {
        let is_capture = mv.is_en_passant || pos.piece_at(mv.to).is_some();
        let mut s = String::with_capacity(8);
        match piece.kind.letter() {
            Some(letter) => {
                s.push(letter);
                s.push_str(&disambiguation(pos, mv, piece));
            }
            None if is_capture => s.push((b'a' + file_of(mv.from) as u8) as char),
            None => {}
        }
        if is_capture {
            s.push('x');
        }
        s.push_str(&sq_to_coord(mv.to));
        if let Some(promo) = mv.promo
            && let Some(letter) = promo.letter()
        {
            s.push('=');
            s.push(letter);
        }
        s
    };

    let mut after = pos.play(mv);
    if after.in_check(after.side_to_move) {
        out.push(if has_legal_move(&mut after) { '+' } else { '#' });
    }
    out
}

/// File, rank, or full square of the origin when another piece of the same
/// kind could also reach `mv.to`.
fn disambiguation(pos: &mut Position, mv: Move, piece: Piece) -> String {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    let rivals: Vec<u8> = moves
        .iter()
        .filter(|m| m.to == mv.to && m.from != mv.from)
        .map(|m| m.from)
        .filter(|&from| pos.piece_at(from).is_some_and(|p| p.kind == piece.kind))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let coord = sq_to_coord(mv.from);
    if rivals.iter().all(|&r| file_of(r) != file_of(mv.from)) {
        coord[..1].to_string()
    } else if rivals.iter().all(|&r| rank_of(r) != rank_of(mv.from)) {
        coord[1..].to_string()
    } else {
        coord
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
