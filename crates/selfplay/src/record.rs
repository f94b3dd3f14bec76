//! Finished games in exportable form.

use chess_core::{DrawReason, Outcome};
use chess_session::{Level, Session};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub white: Level,
    pub black: Level,
    pub outcome: Outcome,
    pub draw: Option<DrawReason>,
    /// The ply limit ran out before the game ended.
    pub adjudicated: bool,
    /// Standard algebraic notation, one entry per ply.
    pub moves: Vec<String>,
    pub final_fen: String,
}

impl GameRecord {
    pub fn from_session(session: &Session, white: Level, black: Level) -> Self {
        let game = session.game();
        let outcome = game.outcome();
        Self {
            white,
            black,
            outcome,
            draw: game.status().draw,
            adjudicated: outcome == Outcome::Ongoing,
            moves: game.history().iter().map(|r| r.notation.clone()).collect(),
            final_fen: game.position().to_fen(),
        }
    }

    pub fn result_tag(&self) -> &'static str {
        match self.outcome {
            Outcome::WhiteWins => "1-0",
            Outcome::BlackWins => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Ongoing => "*",
        }
    }

    /// Numbered move text ending in the result, e.g. `1. e4 e5 2. Nf3 *`.
    pub fn movetext(&self) -> String {
        let mut text = String::new();
        for (i, pair) in self.moves.chunks(2).enumerate() {
            text.push_str(&format!("{}. {} ", i + 1, pair.join(" ")));
        }
        text.push_str(self.result_tag());
        text
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
