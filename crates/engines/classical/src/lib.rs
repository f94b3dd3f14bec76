//! Classical Chess Engine
//!
//! Static evaluation plus every strength tier, from uniform random play to
//! alpha-beta with quiescence. The level decides which one answers a search.

pub mod eval;
pub mod level;
pub mod ordering;
pub mod search;
pub mod tiers;

use chess_core::{Engine, Position, SearchControl, SearchResult, legal_moves_into};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

pub use eval::{EvalConfig, Evaluator, PieceSquareTables, PieceValues};
pub use level::{Level, LevelParseError, Strategy};
pub use search::{Algorithm, INF, MATE_SCORE, SearchConfig, SearchOutcome, Searcher};

/// The computer player.
///
/// Randomness comes from an owned `StdRng`; seed it for reproducible games.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    level: Level,
    evaluator: Evaluator,
    config: SearchConfig,
    rng: StdRng,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new(level: Level) -> Self {
        Self::with_config(level, EvalConfig::default(), SearchConfig::default())
    }

    pub fn with_config(level: Level, eval: EvalConfig, config: SearchConfig) -> Self {
        Self {
            level,
            evaluator: Evaluator::new(eval),
            config,
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Replaces the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, control: &SearchControl) -> SearchResult {
        self.nodes = 0;

        let mut tmp = pos.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut tmp, &mut moves);
        if moves.is_empty() {
            return SearchResult::no_move();
        }

        let mut searcher = Searcher::new(&self.evaluator, &self.config, control);
        let outcome = match self.level.strategy() {
            Strategy::Random => pick(tiers::random(&moves, &mut self.rng)),
            Strategy::Easy => pick(tiers::easy(
                &tmp,
                &moves,
                self.config.easy_capture_bias,
                &mut self.rng,
            )),
            Strategy::Medium => pick(tiers::medium(
                &tmp,
                &moves,
                &self.evaluator.config().piece_values,
                self.config.medium_best_capture,
                &mut self.rng,
            )),
            Strategy::Hard => tiers::hard(&mut searcher, &mut tmp, &moves),
            Strategy::Advanced => {
                tiers::advanced(&mut searcher, &mut tmp, &moves, self.config.advanced_reply_cap)
            }
            Strategy::Search { depth, algorithm } => {
                searcher.search_root(&mut tmp, depth, algorithm, &mut self.rng)
            }
        };
        self.nodes = searcher.nodes.max(1);

        debug!(
            level = %self.level,
            best = ?outcome.best_move,
            score = outcome.score,
            nodes = self.nodes,
            stopped = outcome.stopped,
            "search finished"
        );

        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: self.level.depth(),
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Classical"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

fn pick(best_move: Option<chess_core::Move>) -> SearchOutcome {
    SearchOutcome {
        best_move,
        ..SearchOutcome::none()
    }
}
