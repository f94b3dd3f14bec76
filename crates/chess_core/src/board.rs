use std::ops::{Deref, DerefMut};

use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    fn clear(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drops the right tied to the rook home square `sq`, if any.
    fn clear_for_rook_square(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }

    /// Rights as `[wk, wq, bk, bq]`, the order the Zobrist keys use.
    pub fn flags(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything needed to reverse one [`Position::make_move`] exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    /// Captured piece and the square it stood on (differs from `to` for en passant).
    pub captured: Option<(u8, Piece)>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8, Piece)>, // (rook_from, rook_to, rook) for castling
}

/// Rook squares `(from, to)` for a castling king move.
pub fn castle_rook_squares(king_from: u8, king_to: u8) -> (u8, u8) {
    let rank = rank_of(king_from);
    if king_to > king_from {
        (rank as u8 * 8 + 7, rank as u8 * 8 + 5)
    } else {
        (rank as u8 * 8, rank as u8 * 8 + 3)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        p.reset();
        p
    }

    /// Restores the standard initial layout in place.
    pub fn reset(&mut self) {
        self.board = [None; 64];
        for f in 0..8 {
            self.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            self.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            self.board[f] = Some(Piece::new(Color::White, kind));
            self.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        self.side_to_move = Color::White;
        self.castling = CastlingRights::ALL;
        self.en_passant = None;
        self.halfmove_clock = 0;
        self.fullmove_number = 1;
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: rank_idx })?;
                    let mut piece = Piece::new(color, kind);
                    piece.has_moved = match kind {
                        PieceKind::Pawn => rank != color.pawn_rank(),
                        PieceKind::King => s != color.back_rank() as u8 * 8 + 4,
                        _ => false,
                    };
                    board[s as usize] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank_idx });
            }
        }

        for color in Color::BOTH {
            let count = board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm_part.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }

        // The target sits behind a pawn the opponent just pushed two squares.
        let ep_rank = match side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        let en_passant = match ep_part {
            "-" => None,
            _ => match coord_to_sq(ep_part) {
                Some(s) if rank_of(s) == ep_rank => Some(s),
                _ => return Err(FenError::EnPassant(ep_part.to_string())),
            },
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| FenError::Counter(halfmove_part.to_string()))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| FenError::Counter(fullmove_part.to_string()))?;

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        if pos.in_check(side_to_move.other()) {
            return Err(FenError::OpponentInCheck(side_to_move.other()));
        }
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out.push(' ');
        let rights: String = [
            ('K', self.castling.wk),
            ('Q', self.castling.wq),
            ('k', self.castling.bk),
            ('q', self.castling.bq),
        ]
        .iter()
        .filter(|(_, on)| *on)
        .map(|(c, _)| *c)
        .collect();
        out.push_str(if rights.is_empty() { "-" } else { &rights });
        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        for i in 0..64 {
            if let Some(pc) = self.board[i]
                && pc.color == c
                && pc.kind == PieceKind::King
            {
                return Some(i as u8);
            }
        }
        None
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as u8, pc)))
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, pc)| pc.color == color && pc.kind == kind)
            .count()
    }

    /// Zobrist key over placement, side to move, castling rights and en passant file.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for (s, pc) in self.pieces() {
            h ^= ZOBRIST.piece_key(pc, s);
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        for (i, on) in self.castling.flags().iter().enumerate() {
            if *on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(file_of(ep) as u8);
        }
        h
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to).map(|pc| (to, pc));
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // En passant removes the pawn beside the origin, not the one on `to`.
        if mv.is_en_passant
            && let Some(cs) = sq(file_of(to), rank_of(from))
        {
            captured = self.piece_at(cs).map(|pc| (cs, pc));
            self.set_piece(cs, None);
        }

        debug_assert!(
            captured.is_none_or(|(_, pc)| pc.kind != PieceKind::King),
            "kings are never captured"
        );

        // Castling relocates the rook before the king lands.
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let (rf, rt) = castle_rook_squares(from, to);
            let rook = self.piece_at(rf).expect("castling without a rook on its corner");
            self.set_piece(rf, None);
            self.set_piece(
                rt,
                Some(Piece {
                    has_moved: true,
                    ..rook
                }),
            );
            rook_move = Some((rf, rt, rook));
        }

        self.set_piece(from, None);
        let mut landed = Piece {
            has_moved: true,
            ..moved
        };
        if moved.kind == PieceKind::Pawn && rank_of(to) == moved.color.promotion_rank() {
            landed.kind = mv.promo.unwrap_or(PieceKind::Queen);
        }
        self.set_piece(to, Some(landed));

        if moved.kind == PieceKind::King {
            self.castling.clear(moved.color);
        }
        if moved.kind == PieceKind::Rook {
            self.castling.clear_for_rook_square(from);
        }
        // A rook captured on its corner takes its right with it.
        if let Some((cs, cp)) = captured
            && cp.kind == PieceKind::Rook
        {
            self.castling.clear_for_rook_square(cs);
        }

        // Double pawn push sets en-passant square
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            let ep_rank = (rank_of(from) + rank_of(to)) / 2;
            self.en_passant = sq(file_of(from), ep_rank);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt, rook)) = undo.rook_move {
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // The snapshot also reverts a promoted piece to its pawn.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        if let Some((cs, cp)) = undo.captured {
            self.set_piece(cs, Some(cp));
        }
    }

    /// Plays `mv` for the lifetime of the returned guard, which unmakes it on drop.
    pub fn play(&mut self, mv: Move) -> PlyGuard<'_> {
        let undo = self.make_move(mv);
        PlyGuard {
            pos: self,
            mv,
            undo: Some(undo),
        }
    }
}

/// A move applied to a borrowed [`Position`] and reverted when the guard goes out
/// of scope, including early returns and loop breaks.
pub struct PlyGuard<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl PlyGuard<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for PlyGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for PlyGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for PlyGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
