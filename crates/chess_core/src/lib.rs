pub mod attacks;
pub mod board;
pub mod control;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod status;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use control::SearchControl;
pub use error::{FenError, GameError};
pub use game::{Game, MoveRecord};
pub use movegen::*;
pub use notation::san;
pub use perft::{divide, perft};
pub use status::{DrawReason, DrawRules, GameStatus, Outcome, is_insufficient_material};
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait — implemented by every move selector
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the side to move
    pub score: i32,
    /// Nominal search depth in plies; 0 for tiers that do not search
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
    /// Whether the search was cancelled before finishing
    pub stopped: bool,
}

impl SearchResult {
    pub fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all chess engines must implement.
///
/// Strength settings belong to the engine itself; a call only supplies the
/// position and a way to cancel.
pub trait Engine: Send {
    /// Pick a move for the side to move in `pos`.
    ///
    /// Implementations poll `control` and return early with `stopped = true`
    /// once it is set; such a result must not be played.
    fn search(&mut self, pos: &Position, control: &SearchControl) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
