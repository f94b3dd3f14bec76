//! Move ordering for the depth-limited searches.
//!
//! Captures come first by most-valuable-victim / least-valuable-attacker, then
//! checks, then promotions, then castling. The order is rebuilt at every node.

use std::cmp::Reverse;

use chess_core::{Move, MoveInfo, Position, Special};

use crate::eval::PieceValues;

/// Sort key; larger sorts first.
fn order_key(pos: &mut Position, info: &MoveInfo, values: &PieceValues) -> (u8, i32) {
    if let Some(victim) = info.captured {
        // Attacker weighs a tenth so the victim always dominates.
        let score = values.of(victim.kind) * 10 - values.of(info.piece.kind);
        return (4, score);
    }
    if gives_check(pos, info.mv) {
        return (3, 0);
    }
    match info.special {
        Special::Promotion => (2, 0),
        Special::CastleKingside | Special::CastleQueenside => (1, 0),
        _ => (0, 0),
    }
}

/// Reorders `moves` in place. Equal keys keep their generation order.
pub fn order_moves(pos: &mut Position, moves: &mut [Move], values: &PieceValues) {
    let mut keyed: Vec<_> = moves
        .iter()
        .map(|&mv| {
            let info = MoveInfo::describe(pos, mv);
            (order_key(pos, &info, values), mv)
        })
        .collect();
    keyed.sort_by_key(|&(key, _)| Reverse(key));
    for (slot, (_, mv)) in moves.iter_mut().zip(keyed) {
        *slot = mv;
    }
}

/// Captures only, best first. Used by quiescence.
pub fn ordered_captures(pos: &Position, moves: &[Move], values: &PieceValues) -> Vec<Move> {
    let mut captures: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| MoveInfo::describe(pos, mv))
        .filter_map(|info| {
            info.captured.map(|victim| {
                let score = values.of(victim.kind) * 10 - values.of(info.piece.kind);
                (score, info.mv)
            })
        })
        .collect();
    captures.sort_by_key(|&(score, _)| Reverse(score));
    captures.into_iter().map(|(_, mv)| mv).collect()
}

pub fn gives_check(pos: &mut Position, mv: Move) -> bool {
    let after = pos.play(mv);
    after.in_check(after.side_to_move)
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
