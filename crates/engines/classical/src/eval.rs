//! Static evaluation in centipawns from the side to move.
//!
//! Every term is computed for both colors and reported as "side to move minus
//! opponent", so a caller must hand in the position with the perspective it
//! wants already on move. All weights and tables come from [`EvalConfig`].

use chess_core::{Color, PieceKind, Position, legal_moves_into, sq};
use serde::{Deserialize, Serialize};

/// An 8×8 bonus table, indexed `[rank][file]` from White's side of the board.
pub type Table = [[i32; 8]; 8];

/// Material values in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 300,
            bishop: 320,
            rook: 500,
            queen: 900,
            king: 0,
        }
    }
}

impl PieceValues {
    pub fn of(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceSquareTables {
    pub pawn: Table,
    pub knight: Table,
    pub bishop: Table,
    pub rook: Table,
    pub queen: Table,
    pub king_midgame: Table,
    pub king_endgame: Table,
}

impl PieceSquareTables {
    pub fn table(&self, kind: PieceKind, endgame: bool) -> &Table {
        match kind {
            PieceKind::Pawn => &self.pawn,
            PieceKind::Knight => &self.knight,
            PieceKind::Bishop => &self.bishop,
            PieceKind::Rook => &self.rook,
            PieceKind::Queen => &self.queen,
            PieceKind::King if endgame => &self.king_endgame,
            PieceKind::King => &self.king_midgame,
        }
    }
}

impl Default for PieceSquareTables {
    fn default() -> Self {
        Self {
            pawn: [
                [0, 0, 0, 0, 0, 0, 0, 0],
                [10, 10, 10, 20, 20, 10, 10, 10],
                [10, 0, 0, 30, 30, 0, 0, 10],
                [10, 10, 20, 30, 30, 20, 10, 10],
                [20, 20, 30, 40, 40, 30, 20, 20],
                [30, 30, 40, 50, 50, 40, 30, 30],
                [50, 50, 50, 50, 50, 50, 50, 50],
                [0, 0, 0, 0, 0, 0, 0, 0],
            ],
            knight: [
                [0, 10, 20, 20, 20, 20, 10, 0],
                [10, 30, 40, 40, 40, 40, 30, 10],
                [20, 40, 50, 50, 50, 50, 40, 20],
                [20, 40, 50, 50, 50, 50, 40, 20],
                [20, 40, 50, 50, 50, 50, 40, 20],
                [20, 40, 50, 50, 50, 50, 40, 20],
                [10, 30, 40, 40, 40, 40, 30, 10],
                [0, 10, 20, 20, 20, 20, 10, 0],
            ],
            bishop: [
                [0, 10, 10, 10, 10, 10, 10, 0],
                [10, 20, 20, 20, 20, 20, 20, 10],
                [10, 20, 30, 30, 30, 30, 20, 10],
                [10, 20, 30, 40, 40, 30, 20, 10],
                [10, 20, 30, 40, 40, 30, 20, 10],
                [10, 20, 30, 30, 30, 30, 20, 10],
                [10, 20, 20, 20, 20, 20, 20, 10],
                [0, 10, 10, 10, 10, 10, 10, 0],
            ],
            rook: [
                [10, 10, 10, 10, 10, 10, 10, 10],
                [20, 20, 20, 20, 20, 20, 20, 20],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [30, 30, 30, 40, 40, 30, 30, 30],
            ],
            queen: [
                [0, 10, 10, 20, 20, 10, 10, 0],
                [10, 20, 20, 20, 20, 20, 20, 10],
                [10, 20, 30, 30, 30, 30, 20, 10],
                [20, 20, 30, 40, 40, 30, 20, 20],
                [20, 20, 30, 40, 40, 30, 20, 20],
                [10, 20, 30, 30, 30, 30, 20, 10],
                [10, 20, 20, 20, 20, 20, 20, 10],
                [0, 10, 10, 20, 20, 10, 10, 0],
            ],
            king_midgame: [
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
                [10, 10, 0, 0, 0, 0, 10, 10],
                [20, 30, 10, 0, 0, 10, 30, 20],
            ],
            king_endgame: [
                [30, 40, 40, 30, 30, 40, 40, 30],
                [40, 50, 50, 40, 40, 50, 50, 40],
                [40, 50, 50, 40, 40, 50, 50, 40],
                [30, 40, 40, 30, 30, 40, 40, 30],
                [20, 30, 30, 20, 20, 30, 30, 20],
                [10, 20, 20, 10, 10, 20, 20, 10],
                [0, 10, 10, 0, 0, 10, 10, 0],
                [0, 0, 0, 0, 0, 0, 0, 0],
            ],
        }
    }
}

/// Weights for every evaluation term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub piece_values: PieceValues,
    pub tables: PieceSquareTables,
    /// Per legal move.
    pub mobility: i32,
    /// Per half-square of distance between the king and the board centre.
    pub king_center_distance: i32,
    pub king_attacked: i32,
    /// Per pawn beyond the first on a file.
    pub doubled_pawn: i32,
    pub isolated_pawn: i32,
    pub passed_pawn: i32,
    /// Per occupied central square.
    pub center_square: i32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            piece_values: PieceValues::default(),
            tables: PieceSquareTables::default(),
            mobility: 10,
            king_center_distance: 5,
            king_attacked: 50,
            doubled_pawn: 50,
            isolated_pawn: 50,
            passed_pawn: 100,
            center_square: 20,
        }
    }
}

/// d4, e4, d5, e5.
const CENTER: [u8; 4] = [27, 28, 35, 36];

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn value(&self, kind: PieceKind) -> i32 {
        self.config.piece_values.of(kind)
    }

    /// Sum of all terms.
    pub fn evaluate(&self, pos: &Position) -> i32 {
        self.material(pos)
            + self.piece_square(pos)
            + self.mobility(pos)
            + self.king_safety(pos)
            + self.pawn_structure(pos)
            + self.center_control(pos)
    }

    pub fn material(&self, pos: &Position) -> i32 {
        pos.pieces()
            .map(|(_, pc)| perspective(pos, pc.color) * self.value(pc.kind))
            .sum()
    }

    /// Black reads every table rotated by 180 degrees, so both colors see their
    /// own side of the board at rank 0.
    pub fn piece_square(&self, pos: &Position) -> i32 {
        let endgame = is_endgame(pos);
        pos.pieces()
            .map(|(s, pc)| {
                let (rank, file) = ((s / 8) as usize, (s % 8) as usize);
                let (row, col) = match pc.color {
                    Color::White => (rank, file),
                    Color::Black => (7 - rank, 7 - file),
                };
                let bonus = self.config.tables.table(pc.kind, endgame)[row][col];
                perspective(pos, pc.color) * bonus
            })
            .sum()
    }

    pub fn mobility(&self, pos: &Position) -> i32 {
        let us = pos.side_to_move;
        let diff = legal_move_count(pos, us) - legal_move_count(pos, us.other());
        diff * self.config.mobility
    }

    pub fn king_safety(&self, pos: &Position) -> i32 {
        let us = pos.side_to_move;
        self.king_term(pos, us) - self.king_term(pos, us.other())
    }

    fn king_term(&self, pos: &Position, color: Color) -> i32 {
        let Some(king) = pos.king_sq(color) else {
            return 0;
        };
        let (rank, file) = ((king / 8) as i32, (king % 8) as i32);
        let half_squares = (2 * rank - 7).abs().max((2 * file - 7).abs());
        let mut term = -half_squares * self.config.king_center_distance;
        if pos.is_square_attacked(king, color.other()) {
            term -= self.config.king_attacked;
        }
        term
    }

    pub fn pawn_structure(&self, pos: &Position) -> i32 {
        let us = pos.side_to_move;
        self.pawn_term(pos, us) - self.pawn_term(pos, us.other())
    }

    fn pawn_term(&self, pos: &Position, color: Color) -> i32 {
        let files = pawn_files(pos, color);
        let enemy = pawn_files(pos, color.other());
        let mut term = 0;

        for (file, ranks) in files.iter().enumerate() {
            if ranks.len() > 1 {
                term -= (ranks.len() as i32 - 1) * self.config.doubled_pawn;
            }
            let isolated = adjacent_files(file).all(|f| files[f].is_empty());
            for &rank in ranks {
                if isolated {
                    term -= self.config.isolated_pawn;
                }
                let blocked = (file.saturating_sub(1)..=(file + 1).min(7))
                    .flat_map(|f| enemy[f].iter())
                    .any(|&r| match color {
                        Color::White => r > rank,
                        Color::Black => r < rank,
                    });
                if !blocked {
                    term += self.config.passed_pawn;
                }
            }
        }
        term
    }

    pub fn center_control(&self, pos: &Position) -> i32 {
        CENTER
            .iter()
            .filter_map(|&s| pos.piece_at(s))
            .map(|pc| perspective(pos, pc.color) * self.config.center_square)
            .sum()
    }
}

/// Queens gone, at most ten pieces left, or little heavy and minor material.
pub fn is_endgame(pos: &Position) -> bool {
    let (mut queens, mut rooks_and_minors, mut total) = (0, 0, 0);
    for (_, pc) in pos.pieces() {
        total += 1;
        match pc.kind {
            PieceKind::Queen => queens += 1,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => rooks_and_minors += 1,
            _ => {}
        }
    }
    queens == 0 || total <= 10 || (queens <= 2 && rooks_and_minors <= 4)
}

/// Legal move count for `color`, as if it were that side's turn.
pub fn legal_move_count(pos: &Position, color: Color) -> i32 {
    let mut tmp = pos.clone();
    if tmp.side_to_move != color {
        tmp.side_to_move = color;
        tmp.en_passant = None;
    }
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    moves.len() as i32
}

fn perspective(pos: &Position, color: Color) -> i32 {
    if color == pos.side_to_move { 1 } else { -1 }
}

/// Ranks holding a pawn of `color`, per file.
fn pawn_files(pos: &Position, color: Color) -> [Vec<i8>; 8] {
    let mut files: [Vec<i8>; 8] = Default::default();
    for file in 0..8 {
        for rank in 0..8 {
            if let Some(s) = sq(file, rank)
                && pos
                    .piece_at(s)
                    .is_some_and(|pc| pc.color == color && pc.kind == PieceKind::Pawn)
            {
                files[file as usize].push(rank);
            }
        }
    }
    files
}

fn adjacent_files(file: usize) -> impl Iterator<Item = usize> {
    [file.checked_sub(1), (file < 7).then_some(file + 1)]
        .into_iter()
        .flatten()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
