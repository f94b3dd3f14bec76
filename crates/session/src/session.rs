//! One game in progress, as a UI or driver sees it.

use chess_core::{
    Color, Engine, Game, GameStatus, Move, MoveInfo, MoveRecord, PieceKind, Position,
    SearchControl, SearchResult, Special,
};
use classical_engine::{ClassicalEngine, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// A destination offered for the selected piece.
///
/// The four promotion choices to one square collapse into a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOption {
    pub from: u8,
    pub to: u8,
    pub capture: bool,
    pub special: Special,
}

impl From<&MoveInfo> for MoveOption {
    fn from(info: &MoveInfo) -> Self {
        Self {
            from: info.mv.from,
            to: info.mv.to,
            capture: info.is_capture(),
            special: info.special,
        }
    }
}

/// A computer search running on the blocking pool.
///
/// Dropping the task stops the search. The session stops counting it as
/// thinking, so a task abandoned before its reply is applied (or a
/// `play_computer_move` future dropped mid-search) frees the session for the
/// next computer move.
pub struct SearchTask {
    handle: JoinHandle<SearchResult>,
    control: SearchControl,
    ticket: u64,
}

/// What a finished [`SearchTask`] hands back to its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReply {
    ticket: u64,
    pub result: SearchResult,
}

impl SearchTask {
    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    /// Stops the search. A cancelled task never yields a move.
    pub fn cancel(&self) {
        self.control.stop();
    }

    /// Waits for the search to return.
    pub async fn finish(mut self) -> Result<SearchReply, SessionError> {
        let mut result = (&mut self.handle).await?;
        if self.control.is_stopped() {
            result.stopped = true;
        }
        Ok(SearchReply {
            ticket: self.ticket,
            result,
        })
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        self.control.stop();
    }
}

pub struct Session {
    game: Game,
    config: SessionConfig,
    computer: [bool; 2],
    selected: Option<u8>,
    options: Vec<MoveOption>,
    rng: StdRng,
    /// The latest search started. It stops counting once its control is stopped.
    pending: Option<(u64, SearchControl)>,
    next_ticket: u64,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            game: Game::with_rules(config.draw_rules),
            computer: [config.computer_white, config.computer_black],
            config,
            selected: None,
            options: Vec::new(),
            rng,
            pending: None,
            next_ticket: 0,
        }
    }

    /// Back to the starting position, keeping the settings.
    pub fn initialize_board(&mut self) {
        self.cancel_computer_move();
        self.clear_selection();
        self.game.initialize_board();
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn position(&self) -> &Position {
        self.game.position()
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn history(&self) -> &[MoveRecord] {
        self.game.history()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selected_square(&self) -> Option<u8> {
        self.selected
    }

    /// Options for the selected piece; empty when nothing is selected.
    pub fn options(&self) -> &[MoveOption] {
        &self.options
    }

    /// Legal destinations of the piece on `sq`, one entry per destination.
    pub fn possible_moves(&self, sq: u8) -> Vec<MoveOption> {
        let mut options: Vec<MoveOption> = Vec::new();
        for info in self.game.possible_moves(sq) {
            if !options.iter().any(|o| o.to == info.mv.to) {
                options.push(MoveOption::from(&info));
            }
        }
        options
    }

    /// Click handling: selecting one of the offered destinations plays the
    /// move (promoting to a queen), selecting an own piece offers its moves,
    /// anything else clears the selection.
    pub fn select_square(&mut self, sq: u8) -> &[MoveOption] {
        if self.game.is_over() || self.is_computer_turn() {
            self.clear_selection();
            return &self.options;
        }

        if let Some(from) = self.selected
            && self.options.iter().any(|o| o.to == sq)
        {
            self.clear_selection();
            if let Err(e) = self.make_move(from, sq, None) {
                warn!(error = %e, "selected move was rejected");
            }
            return &self.options;
        }

        let own = self
            .position()
            .piece_at(sq)
            .is_some_and(|p| p.color == self.game.side_to_move());
        if own && self.selected != Some(sq) {
            self.options = self.possible_moves(sq);
            self.selected = Some(sq);
        } else {
            self.clear_selection();
        }
        &self.options
    }

    /// Commits a move. Any search in flight is for the old position and is cancelled.
    pub fn make_move(
        &mut self,
        from: u8,
        to: u8,
        promotion: Option<PieceKind>,
    ) -> Result<&MoveRecord, SessionError> {
        self.cancel_computer_move();
        self.clear_selection();
        Ok(self.game.make_move(from, to, promotion)?)
    }

    pub fn undo_move(&mut self) -> Option<MoveRecord> {
        self.cancel_computer_move();
        self.clear_selection();
        self.game.undo_move()
    }

    pub fn set_computer(&mut self, color: Color, enabled: bool) {
        self.computer[color.idx()] = enabled;
    }

    pub fn is_computer(&self, color: Color) -> bool {
        self.computer[color.idx()]
    }

    pub fn is_computer_turn(&self) -> bool {
        self.is_computer(self.game.side_to_move())
    }

    /// A search is running whose task has been neither cancelled nor dropped.
    pub fn is_thinking(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, control)| !control.is_stopped())
    }

    /// Starts a search for the side to move on the blocking thread pool.
    ///
    /// `None` if the game is over, the side to move is human, or a search is
    /// already running. Must be called from within a Tokio runtime.
    pub fn start_computer_move(&mut self, level: Level) -> Option<SearchTask> {
        if self.game.is_over() || !self.is_computer_turn() || self.is_thinking() {
            return None;
        }

        let control = SearchControl::new();
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some((ticket, control.clone()));
        self.clear_selection();

        let mut engine =
            ClassicalEngine::with_config(level, self.config.eval.clone(), self.config.search.clone())
                .with_seed(self.rng.r#gen());
        let position = self.game.position().clone();
        let search_control = control.clone();
        debug!(%level, side = %self.game.side_to_move(), ticket, "computer thinking");

        let handle = tokio::task::spawn_blocking(move || engine.search(&position, &search_control));
        Some(SearchTask {
            handle,
            control,
            ticket,
        })
    }

    /// Commits the move of a finished search.
    ///
    /// Stale replies (the position changed or the search was cancelled) and
    /// stopped searches are dropped with `Ok(None)`.
    pub fn apply_search(&mut self, reply: SearchReply) -> Result<Option<Move>, SessionError> {
        match self.pending {
            Some((ticket, _)) if ticket == reply.ticket => self.pending = None,
            _ => {
                debug!(ticket = reply.ticket, "dropping stale search reply");
                return Ok(None);
            }
        }
        if reply.result.stopped {
            return Ok(None);
        }
        let Some(mv) = reply.result.best_move else {
            return Ok(None);
        };
        self.game.apply(mv)?;
        Ok(Some(mv))
    }

    /// Searches and plays a move for a computer-controlled side to move.
    ///
    /// `Ok(None)` if the game is over or it is a human's turn. Dropping the
    /// returned future stops the search and leaves the session ready for
    /// another call.
    pub async fn play_computer_move(&mut self, level: Level) -> Result<Option<Move>, SessionError> {
        let Some(task) = self.start_computer_move(level) else {
            return Ok(None);
        };
        match task.finish().await {
            Ok(reply) => self.apply_search(reply),
            Err(e) => {
                self.pending = None;
                Err(e)
            }
        }
    }

    /// [`Session::play_computer_move`] at the configured level.
    pub async fn computer_turn(&mut self) -> Result<Option<Move>, SessionError> {
        let level = self.config.level;
        self.play_computer_move(level).await
    }

    /// Stops the outstanding search, if any; its reply will be dropped.
    pub fn cancel_computer_move(&mut self) {
        if let Some((ticket, control)) = self.pending.take() {
            debug!(ticket, "cancelling computer move");
            control.stop();
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.options.clear();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
