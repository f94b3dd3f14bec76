//! A game in progress: the position plus everything needed to take moves back
//! and to judge repetitions.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::board::{Position, Undo, castle_rook_squares};
use crate::error::GameError;
use crate::movegen::{MoveInfo, all_legal_moves, legal_moves_from};
use crate::notation::san;
use crate::status::{self, DrawRules, GameStatus, Outcome};
use crate::types::*;

/// One committed move, with what is needed to display it and to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub from: u8,
    pub to: u8,
    /// The mover as it stood before the move (a pawn, for promotions).
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Where the captured piece stood; differs from `to` for en passant.
    pub captured_square: Option<u8>,
    pub notation: String,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub castle_rook: Option<(u8, u8)>,
    pub promotion: Option<PieceKind>,
    /// Key added to the repetition table by this move.
    pub hash: u64,
    pub undo: Undo,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<MoveRecord>,
    position_counts: HashMap<u64, u32>,
    status: GameStatus,
    rules: DrawRules,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_rules(DrawRules::default())
    }

    pub fn with_rules(rules: DrawRules) -> Self {
        Self {
            position: Position::startpos(),
            history: Vec::new(),
            position_counts: HashMap::new(),
            status: GameStatus::default(),
            rules,
        }
    }

    /// Starts a game from an arbitrary position. Its status is evaluated right away;
    /// the position itself is not counted toward repetitions.
    pub fn from_fen(fen: &str, rules: DrawRules) -> Result<Self, GameError> {
        let mut game = Self::with_rules(rules);
        game.position = Position::from_fen(fen)?;
        game.status = status::evaluate(&mut game.position, 0, &game.rules);
        Ok(game)
    }

    /// Back to the standard initial layout, reusing the existing storage.
    pub fn initialize_board(&mut self) {
        self.position.reset();
        self.history.clear();
        self.position_counts.clear();
        self.status = GameStatus::default();
        debug!("board initialized");
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn outcome(&self) -> Outcome {
        self.status.outcome(self.position.side_to_move)
    }

    /// How often the current position has been reached by a committed move.
    pub fn repetitions(&self) -> u32 {
        self.position_counts
            .get(&self.position.position_hash())
            .copied()
            .unwrap_or(0)
    }

    /// Legal moves of the piece on `sq`; empty for an empty square or the
    /// opponent's piece.
    pub fn possible_moves(&self, sq: u8) -> Vec<MoveInfo> {
        legal_moves_from(&self.position, sq)
            .into_iter()
            .map(|mv| MoveInfo::describe(&self.position, mv))
            .collect()
    }

    pub fn all_legal_moves(&self, color: Color) -> Vec<MoveInfo> {
        all_legal_moves(&self.position, color)
    }

    /// Commits the legal move `from` → `to`.
    ///
    /// A pawn reaching the last rank becomes `promotion`, queen when `None`.
    pub fn make_move(
        &mut self,
        from: u8,
        to: u8,
        promotion: Option<PieceKind>,
    ) -> Result<&MoveRecord, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let wanted = promotion.unwrap_or(PieceKind::Queen);
        let mv = legal_moves_from(&self.position, from)
            .into_iter()
            .find(|m| m.to == to && m.promo.is_none_or(|p| p == wanted))
            .ok_or(GameError::IllegalMove { from, to })?;
        Ok(self.commit(mv))
    }

    /// Like [`Game::make_move`] with the promotion given by name.
    ///
    /// Names are case-insensitive; anything that is not a promotable piece
    /// falls back to a queen.
    pub fn make_move_named(
        &mut self,
        from: u8,
        to: u8,
        promotion: &str,
    ) -> Result<&MoveRecord, GameError> {
        let kind = PieceKind::from_promotion_name(promotion).unwrap_or_else(|| {
            warn!(promotion, "unrecognized promotion piece, using queen");
            PieceKind::Queen
        });
        self.make_move(from, to, Some(kind))
    }

    /// Commits a move already known to be legal, such as one chosen by an engine.
    pub fn apply(&mut self, mv: Move) -> Result<&MoveRecord, GameError> {
        self.make_move(mv.from, mv.to, mv.promo)
    }

    fn commit(&mut self, mv: Move) -> &MoveRecord {
        let info = MoveInfo::describe(&self.position, mv);
        let notation = san(&mut self.position, mv);
        let captured_square = info.captured.map(|_| {
            if mv.is_en_passant {
                (rank_of(mv.from) as u8) * 8 + file_of(mv.to) as u8
            } else {
                mv.to
            }
        });

        let undo = self.position.make_move(mv);
        let hash = self.position.position_hash();
        let count = self.position_counts.entry(hash).or_insert(0);
        *count += 1;
        let repetitions = *count;
        self.status = status::evaluate(&mut self.position, repetitions, &self.rules);

        trace!(ply = self.history.len() + 1, %notation, "move committed");
        if self.status.is_over() {
            debug!(status = ?self.status, outcome = ?self.outcome(), "game over");
        }

        self.history.push(MoveRecord {
            mv,
            from: mv.from,
            to: mv.to,
            piece: info.piece,
            captured: info.captured,
            captured_square,
            notation,
            is_en_passant: mv.is_en_passant,
            is_castle: mv.is_castle,
            castle_rook: mv.is_castle.then(|| castle_rook_squares(mv.from, mv.to)),
            promotion: mv.promo,
            hash,
            undo,
        });
        &self.history[self.history.len() - 1]
    }

    /// Takes back the last move. Status flags are cleared, not recomputed.
    pub fn undo_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.position.unmake_move(record.mv, record.undo.clone());

        if let Some(count) = self.position_counts.get_mut(&record.hash) {
            *count -= 1;
            if *count == 0 {
                self.position_counts.remove(&record.hash);
            }
        }
        self.status = GameStatus::default();
        debug!(notation = %record.notation, "move undone");
        Some(record)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
