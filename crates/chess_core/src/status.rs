//! Game-status evaluation: check, checkmate, stalemate and the draw rules.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::has_legal_move;
use crate::types::*;

/// Thresholds for the repetition and move-count draws.
///
/// Clocks are counted in half-moves, matching the position's half-move clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    pub threefold: u32,
    pub fivefold: u32,
    pub fifty_move: u32,
    pub seventy_five_move: u32,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            threefold: 3,
            fivefold: 5,
            fifty_move: 50,
            seventy_five_move: 75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FivefoldRepetition,
    SeventyFiveMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// Status flags for the side to move.
///
/// `stalemate` is set for every draw, not only the no-legal-moves kind; `draw`
/// says which rule ended the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw: Option<DrawReason>,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        self.checkmate || self.stalemate
    }

    /// Result of the game given who is to move in the evaluated position.
    pub fn outcome(&self, side_to_move: Color) -> Outcome {
        if self.checkmate {
            match side_to_move {
                Color::White => Outcome::BlackWins,
                Color::Black => Outcome::WhiteWins,
            }
        } else if self.stalemate {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}

/// Evaluates `pos` after a committed move.
///
/// `repetitions` is how often the current position has occurred, itself included.
/// Automatic draws win over everything else, then the claimable draws, and only
/// then is the game checked for mate or stalemate.
pub fn evaluate(pos: &mut Position, repetitions: u32, rules: &DrawRules) -> GameStatus {
    let check = pos.in_check(pos.side_to_move);
    let drawn = |reason| GameStatus {
        check,
        checkmate: false,
        stalemate: true,
        draw: Some(reason),
    };

    if repetitions >= rules.fivefold {
        return drawn(DrawReason::FivefoldRepetition);
    }
    if pos.halfmove_clock >= rules.seventy_five_move {
        return drawn(DrawReason::SeventyFiveMoveRule);
    }

    if is_insufficient_material(pos) {
        return drawn(DrawReason::InsufficientMaterial);
    }
    if repetitions >= rules.threefold {
        return drawn(DrawReason::ThreefoldRepetition);
    }
    if pos.halfmove_clock >= rules.fifty_move {
        return drawn(DrawReason::FiftyMoveRule);
    }

    if has_legal_move(pos) {
        GameStatus {
            check,
            ..GameStatus::default()
        }
    } else if check {
        GameStatus {
            check,
            checkmate: true,
            stalemate: false,
            draw: None,
        }
    } else {
        drawn(DrawReason::Stalemate)
    }
}

/// Neither side can deliver mate with what is left.
///
/// Covers king against king with at most one minor piece each, and any number
/// of bishops that all stand on squares of one colour.
pub fn is_insufficient_material(pos: &Position) -> bool {
    let mut minors = [0u32; 2];
    let mut bishop_squares = (false, false); // (light, dark)
    let mut only_bishops = true;

    for (s, pc) in pos.pieces() {
        match pc.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => {
                only_bishops = false;
                minors[pc.color.idx()] += 1;
            }
            PieceKind::Bishop => {
                minors[pc.color.idx()] += 1;
                if is_light_square(s) {
                    bishop_squares.0 = true;
                } else {
                    bishop_squares.1 = true;
                }
            }
        }
    }

    if minors.iter().all(|&n| n <= 1) {
        return true;
    }
    only_bishops && !(bishop_squares.0 && bishop_squares.1)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
