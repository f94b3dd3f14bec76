//! Attack detection on the mailbox board.
//!
//! Instead of expanding every enemy piece, the oracle looks outward from the
//! target square with each piece's move shape and checks whether a matching
//! enemy piece sits at the end. For every piece except the pawn the attack set
//! equals the move set, so the two views agree.

use crate::board::Position;
use crate::types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Position {
    /// True if any piece of color `by` attacks `target`.
    ///
    /// Pawns attack diagonally forward whether or not the square is occupied.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn of `by` attacks `target` from one rank behind it.
        let pr = tr - by.forward();
        for df in [-1, 1] {
            if self.holds(sq(tf + df, pr), by, |k| k == PieceKind::Pawn) {
                return true;
            }
        }

        for (df, dr) in KNIGHT_OFFSETS {
            if self.holds(sq(tf + df, tr + dr), by, |k| k == PieceKind::Knight) {
                return true;
            }
        }

        for (df, dr) in KING_OFFSETS {
            if self.holds(sq(tf + df, tr + dr), by, |k| k == PieceKind::King) {
                return true;
            }
        }

        let diagonal = |k: PieceKind| matches!(k, PieceKind::Bishop | PieceKind::Queen);
        let straight = |k: PieceKind| matches!(k, PieceKind::Rook | PieceKind::Queen);
        DIAGONALS
            .iter()
            .any(|&dir| self.first_on_ray(target, dir, by, diagonal))
            || ORTHOGONALS
                .iter()
                .any(|&dir| self.first_on_ray(target, dir, by, straight))
    }

    /// Whether `color`'s king is attacked.
    ///
    /// # Panics
    /// If `color` has no king on the board.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self
            .king_sq(color)
            .unwrap_or_else(|| panic!("{color} king missing from the board"));
        self.is_square_attacked(king, color.other())
    }

    fn holds(&self, s: Option<u8>, by: Color, kind: impl Fn(PieceKind) -> bool) -> bool {
        s.and_then(|s| self.piece_at(s))
            .is_some_and(|pc| pc.color == by && kind(pc.kind))
    }

    /// Walks from `from` along `dir` and tests the first occupied square.
    fn first_on_ray(
        &self,
        from: u8,
        (df, dr): (i8, i8),
        by: Color,
        kind: impl Fn(PieceKind) -> bool,
    ) -> bool {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(s) = sq(f, r) {
            if let Some(pc) = self.piece_at(s) {
                return pc.color == by && kind(pc.kind);
            }
            f += df;
            r += dr;
        }
        false
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
