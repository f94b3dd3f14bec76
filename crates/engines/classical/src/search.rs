//! Negamax search: plain minimax, alpha-beta with move ordering, and a
//! capture-only quiescence extension.

use chess_core::{
    Move, MoveInfo, Position, SearchControl, has_legal_move, is_insufficient_material,
    legal_moves_into,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::eval::Evaluator;
use crate::ordering::{order_moves, ordered_captures};

/// Larger than any reachable score.
pub const INF: i32 = 30_000;
/// Score of being mated at the root; mates further away score closer to zero.
pub const MATE_SCORE: i32 = 29_000;

/// Tier probabilities and search bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Chance that the easy tier only considers captures.
    pub easy_capture_bias: f64,
    /// Chance that the medium tier takes the most valuable capture.
    pub medium_best_capture: f64,
    /// Opponent replies the advanced tier looks at per candidate.
    pub advanced_reply_cap: usize,
    /// Material slack for delta pruning in quiescence.
    pub delta_margin: i32,
    pub quiescence_max_ply: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            easy_capture_bias: 0.3,
            medium_best_capture: 0.8,
            advanced_reply_cap: 5,
            delta_margin: 200,
            quiescence_max_ply: 32,
        }
    }
}

/// How a depth-limited search expands each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Full-width negamax.
    Minimax,
    /// Negamax with a window, ordered moves and optional quiescence at the horizon.
    AlphaBeta { quiescence: bool },
}

/// What a root search settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: i32,
    /// True if the control was stopped before the search finished
    pub stopped: bool,
}

impl SearchOutcome {
    pub(crate) fn none() -> Self {
        Self {
            best_move: None,
            score: 0,
            stopped: false,
        }
    }
}

/// State for one search call. The position is searched in place with
/// make/unmake, so only one search may run against a position at a time.
pub struct Searcher<'a> {
    pub(crate) evaluator: &'a Evaluator,
    pub(crate) config: &'a SearchConfig,
    control: &'a SearchControl,
    pub nodes: u64,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator, config: &'a SearchConfig, control: &'a SearchControl) -> Self {
        Self {
            evaluator,
            config,
            control,
            nodes: 0,
            stopped: false,
        }
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Polls the control; once it trips the search unwinds without new work.
    pub(crate) fn should_stop(&mut self) -> bool {
        if !self.stopped && self.control.is_stopped() {
            self.stopped = true;
        }
        self.stopped
    }

    /// Searches every root move to `depth` plies and picks uniformly among
    /// those tied for the best score.
    pub fn search_root<R: Rng + ?Sized>(
        &mut self,
        pos: &mut Position,
        depth: u8,
        algorithm: Algorithm,
        rng: &mut R,
    ) -> SearchOutcome {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return SearchOutcome::none();
        }
        if matches!(algorithm, Algorithm::AlphaBeta { .. }) {
            order_moves(pos, &mut moves, &self.evaluator.config().piece_values);
        }

        let depth = depth.max(1);
        let mut best = -INF;
        let mut tied: Vec<Move> = Vec::new();

        for mv in moves {
            if self.should_stop() {
                break;
            }
            let score = {
                let mut child = pos.play(mv);
                self.nodes += 1;
                match algorithm {
                    Algorithm::Minimax => -self.minimax(&mut child, depth - 1, 1),
                    Algorithm::AlphaBeta { quiescence } => {
                        // One below the best so far keeps equal scores exact.
                        let alpha = if best > -INF { best - 1 } else { -INF };
                        -self.alpha_beta(&mut child, depth - 1, -INF, -alpha, 1, quiescence)
                    }
                }
            };
            if self.stopped {
                break;
            }
            if score > best {
                best = score;
                tied.clear();
                tied.push(mv);
            } else if score == best {
                tied.push(mv);
            }
        }

        SearchOutcome {
            best_move: tied.choose(rng).copied(),
            score: best,
            stopped: self.stopped,
        }
    }

    /// Full-width negamax to `depth`.
    pub fn minimax(&mut self, pos: &mut Position, depth: u8, ply: i32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        if is_insufficient_material(pos) {
            return 0;
        }
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return self.no_moves_score(pos, ply);
        }
        if depth == 0 {
            return self.evaluator.evaluate(pos);
        }

        let mut best = -INF;
        for mv in moves {
            let mut child = pos.play(mv);
            self.nodes += 1;
            let score = -self.minimax(&mut child, depth - 1, ply + 1);
            if self.stopped {
                return 0;
            }
            best = best.max(score);
        }
        best
    }

    /// Fail-soft negamax with an `(alpha, beta)` window.
    pub fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
        quiescence: bool,
    ) -> i32 {
        if self.should_stop() {
            return 0;
        }
        if is_insufficient_material(pos) {
            return 0;
        }
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return self.no_moves_score(pos, ply);
        }
        if depth == 0 {
            return if quiescence {
                self.quiescence(pos, alpha, beta, ply, 0)
            } else {
                self.evaluator.evaluate(pos)
            };
        }

        order_moves(pos, &mut moves, &self.evaluator.config().piece_values);

        let mut best = -INF;
        for mv in moves {
            let score = {
                let mut child = pos.play(mv);
                self.nodes += 1;
                -self.alpha_beta(&mut child, depth - 1, -beta, -alpha, ply + 1, quiescence)
            };
            if self.stopped {
                return 0;
            }
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Capture-only search past the horizon. Fail-hard around a stand-pat score.
    pub fn quiescence(&mut self, pos: &mut Position, mut alpha: i32, beta: i32, ply: i32, qply: u8) -> i32 {
        if self.should_stop() {
            return 0;
        }
        let stand_pat = self.evaluator.evaluate(pos);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if qply >= self.config.quiescence_max_ply {
            return alpha;
        }

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        let values = self.evaluator.config().piece_values;
        for mv in ordered_captures(pos, &moves, &values) {
            let victim = MoveInfo::describe(pos, mv)
                .captured
                .map_or(0, |p| values.of(p.kind));
            if stand_pat + victim + self.config.delta_margin < alpha {
                continue;
            }
            let score = {
                let mut child = pos.play(mv);
                self.nodes += 1;
                -self.quiescence(&mut child, -beta, -alpha, ply + 1, qply + 1)
            };
            if self.stopped {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Static score of a position for the one-ply tiers: mate and draws are
    /// recognised, everything else goes to the evaluator.
    pub fn leaf_score(&mut self, pos: &mut Position, ply: i32) -> i32 {
        if !has_legal_move(pos) {
            return self.no_moves_score(pos, ply);
        }
        if is_insufficient_material(pos) {
            return 0;
        }
        self.evaluator.evaluate(pos)
    }

    fn no_moves_score(&self, pos: &Position, ply: i32) -> i32 {
        if pos.in_check(pos.side_to_move) {
            -(MATE_SCORE - ply)
        } else {
            0
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
