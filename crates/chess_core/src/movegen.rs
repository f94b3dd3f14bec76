use crate::attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::{board::Position, types::*};

/// Kind of special rule a move relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Special {
    None,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

/// A legal move annotated for callers that list or order moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub mv: Move,
    pub piece: Piece,
    /// The captured piece; for en passant this is the pawn beside the origin.
    pub captured: Option<Piece>,
    pub special: Special,
}

impl MoveInfo {
    pub fn describe(pos: &Position, mv: Move) -> Self {
        let piece = pos
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("no piece on {}", sq_to_coord(mv.from)));
        let captured = if mv.is_en_passant {
            sq(file_of(mv.to), rank_of(mv.from)).and_then(|s| pos.piece_at(s))
        } else {
            pos.piece_at(mv.to)
        };
        let special = if mv.is_castle {
            if mv.to > mv.from {
                Special::CastleKingside
            } else {
                Special::CastleQueenside
            }
        } else if mv.is_en_passant {
            Special::EnPassant
        } else if mv.promo.is_some() {
            Special::Promotion
        } else {
            Special::None
        };
        MoveInfo {
            mv,
            piece,
            captured,
            special,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    let mover = pos.side_to_move;
    for from in 0..64u8 {
        if pos.piece_at(from).is_some_and(|pc| pc.color == mover) {
            pseudo_moves_from(pos, from, out);
        }
    }
    retain_legal(pos, out);
}

/// Legal moves of the piece on `from`.
///
/// Empty when the square is empty or holds a piece of the side not to move.
pub fn legal_moves_from(pos: &Position, from: u8) -> Vec<Move> {
    let mut out = Vec::new();
    if !pos
        .piece_at(from)
        .is_some_and(|pc| pc.color == pos.side_to_move)
    {
        return out;
    }
    let mut tmp = pos.clone();
    pseudo_moves_from(&tmp, from, &mut out);
    retain_legal(&mut tmp, &mut out);
    out
}

/// Whether the side to move has at least one legal move. Stops at the first one.
pub fn has_legal_move(pos: &mut Position) -> bool {
    let mover = pos.side_to_move;
    let mut buf = Vec::with_capacity(32);
    for from in 0..64u8 {
        if !pos.piece_at(from).is_some_and(|pc| pc.color == mover) {
            continue;
        }
        buf.clear();
        pseudo_moves_from(pos, from, &mut buf);
        for &mv in &buf {
            let undo = pos.make_move(mv);
            let legal = !pos.in_check(mover);
            pos.unmake_move(mv, undo);
            if legal {
                return true;
            }
        }
    }
    false
}

/// Every legal move of `color`, annotated.
///
/// For the side not to move the position is scored as if it were its turn,
/// with no en passant target.
pub fn all_legal_moves(pos: &Position, color: Color) -> Vec<MoveInfo> {
    let mut tmp = pos.clone();
    if color != tmp.side_to_move {
        tmp.side_to_move = color;
        tmp.en_passant = None;
    }
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    moves
        .into_iter()
        .map(|mv| MoveInfo::describe(&tmp, mv))
        .collect()
}

// Filter illegal moves in-place by playing them on the mutable position.
fn retain_legal(pos: &mut Position, moves: &mut Vec<Move>) {
    moves.retain(|&mv| {
        let mover = pos.piece_at(mv.from).map_or(pos.side_to_move, |pc| pc.color);
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// Pseudo-legal moves of the piece on `from`, appended to `out`.
///
/// Castling is fully validated here (rights, empty path, no attacked square),
/// so the only remaining legality question is whether the own king is left in check.
pub fn pseudo_moves_from(pos: &Position, from: u8, out: &mut Vec<Move>) {
    let Some(pc) = pos.piece_at(from) else {
        return;
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_OFFSETS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc.color, &DIAGONALS, out);
            gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_OFFSETS, out);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, c: Color, out: &mut Vec<Move>) {
    if rank_of(to) == c.promotion_rank() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::promotion(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();

    // forward 1, then forward 2 from the start rank
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, c, out);
        if r == c.pawn_rank()
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, c, out),
            Some(_) => {}
            None => {
                let beside = sq(f + df, r).and_then(|s| pos.piece_at(s));
                if pos.en_passant == Some(to)
                    && beside.is_some_and(|p| p.color != c && p.kind == PieceKind::Pawn)
                {
                    out.push(Move::en_passant(from, to));
                }
            }
        }
    }
}

/// Knight and king: one step per offset onto an empty or enemy square.
fn gen_steps(pos: &Position, from: u8, c: Color, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in offsets {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let base = c.back_rank() as u8 * 8;
    // Must be on original king square
    if from != base + 4 {
        return;
    }
    let (kingside, queenside) = (pos.castling.kingside(c), pos.castling.queenside(c));
    if !kingside && !queenside {
        return;
    }
    // Can't castle out of check.
    let enemy = c.other();
    if pos.is_square_attacked(from, enemy) {
        return;
    }

    let rook_home = |s: u8| {
        pos.piece_at(s)
            .is_some_and(|p| p.color == c && p.kind == PieceKind::Rook)
    };
    let empty = |squares: &[u8]| squares.iter().all(|&s| pos.piece_at(s).is_none());
    let safe = |squares: &[u8]| squares.iter().all(|&s| !pos.is_square_attacked(s, enemy));

    // King side: e->g, f and g empty and not attacked
    if kingside && rook_home(base + 7) && empty(&[base + 5, base + 6]) && safe(&[base + 5, base + 6])
    {
        out.push(Move::castle(from, base + 6));
    }
    // Queen side: e->c, b/c/d empty; d and c not attacked
    if queenside
        && rook_home(base)
        && empty(&[base + 1, base + 2, base + 3])
        && safe(&[base + 3, base + 2])
    {
        out.push(Move::castle(from, base + 2));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
