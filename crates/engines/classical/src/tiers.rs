//! The shallow strength tiers. None of these search past one ply of replies.

use chess_core::{Move, MoveInfo, Position, legal_moves_into};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::eval::PieceValues;
use crate::ordering::order_moves;
use crate::search::{INF, SearchOutcome, Searcher};

/// Uniform over all legal moves.
pub fn random<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

/// Uniform, except that with probability `capture_bias` the choice is
/// restricted to captures when there are any.
pub fn easy<R: Rng + ?Sized>(
    pos: &Position,
    moves: &[Move],
    capture_bias: f64,
    rng: &mut R,
) -> Option<Move> {
    if rng.gen_bool(capture_bias.clamp(0.0, 1.0)) {
        let captures = captures(pos, moves);
        if !captures.is_empty() {
            return captures.choose(rng).map(|info| info.mv);
        }
    }
    random(moves, rng)
}

/// Takes the most valuable capture with probability `best_capture`, otherwise
/// any capture; falls back to a uniform pick when nothing can be taken.
pub fn medium<R: Rng + ?Sized>(
    pos: &Position,
    moves: &[Move],
    values: &PieceValues,
    best_capture: f64,
    rng: &mut R,
) -> Option<Move> {
    let captures = captures(pos, moves);
    if captures.is_empty() {
        return random(moves, rng);
    }
    if rng.gen_bool(best_capture.clamp(0.0, 1.0)) {
        let mut best: Option<(i32, Move)> = None;
        for info in &captures {
            let value = info.captured.map_or(0, |p| values.of(p.kind));
            if best.is_none_or(|(v, _)| value > v) {
                best = Some((value, info.mv));
            }
        }
        return best.map(|(_, mv)| mv);
    }
    captures.choose(rng).map(|info| info.mv)
}

/// One ply: the static score of each resulting position. First best wins.
pub fn hard(searcher: &mut Searcher<'_>, pos: &mut Position, moves: &[Move]) -> SearchOutcome {
    let mut outcome = SearchOutcome::none();
    let mut best = -INF;
    for &mv in moves {
        if searcher.should_stop() {
            outcome.stopped = true;
            break;
        }
        let mut child = pos.play(mv);
        searcher.nodes += 1;
        let score = -searcher.leaf_score(&mut child, 1);
        if score > best {
            best = score;
            outcome.best_move = Some(mv);
            outcome.score = score;
        }
    }
    outcome
}

/// Each candidate, captures first, is scored by the worst position among the
/// opponent's first `reply_cap` replies.
pub fn advanced(
    searcher: &mut Searcher<'_>,
    pos: &mut Position,
    moves: &[Move],
    reply_cap: usize,
) -> SearchOutcome {
    let mut candidates = moves.to_vec();
    order_moves(pos, &mut candidates, &searcher.evaluator.config().piece_values);

    let mut outcome = SearchOutcome::none();
    let mut best = -INF;
    let mut replies = Vec::with_capacity(64);
    for mv in candidates {
        if searcher.should_stop() {
            outcome.stopped = true;
            break;
        }
        let mut child = pos.play(mv);
        searcher.nodes += 1;
        legal_moves_into(&mut child, &mut replies);

        let score = if replies.is_empty() {
            -searcher.leaf_score(&mut child, 1)
        } else {
            let mut worst = INF;
            for &reply in replies.iter().take(reply_cap.max(1)) {
                let mut grandchild = child.play(reply);
                searcher.nodes += 1;
                worst = worst.min(searcher.leaf_score(&mut grandchild, 2));
            }
            worst
        };
        if score > best {
            best = score;
            outcome.best_move = Some(mv);
            outcome.score = score;
        }
    }
    outcome
}

fn captures(pos: &Position, moves: &[Move]) -> Vec<MoveInfo> {
    moves
        .iter()
        .map(|&mv| MoveInfo::describe(pos, mv))
        .filter(MoveInfo::is_capture)
        .collect()
}

#[cfg(test)]
#[path = "tiers_tests.rs"]
mod tiers_tests;
