//! Error types for position setup and committed game moves.
//!
//! Broken invariants (a missing king, a move from an empty square) are bugs
//! and panic instead of showing up here.

use crate::types::{Color, sq_to_coord};

/// Errors produced while parsing Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in the board field, found {0}")]
    RankCount(usize),

    #[error("invalid piece character '{0}'")]
    PieceChar(char),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling character '{0}'")]
    Castling(char),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Errors returned when committing a move to a [`crate::Game`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no legal move from {} to {}", sq_to_coord(*.from), sq_to_coord(*.to))]
    IllegalMove { from: u8, to: u8 },

    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Fen(#[from] FenError),
}
