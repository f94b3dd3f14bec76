//! Strength levels, by name or on a 1-10 scale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::search::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    #[error("empty level")]
    Empty,
    #[error("unknown level name {0:?}")]
    UnknownName(String),
    #[error("level {0} is outside 1-10")]
    OutOfRange(u64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Random,
    Easy,
    #[default]
    Medium,
    Hard,
    Advanced,
    /// 1 through 10.
    Numeric(u8),
}

/// How a level picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Easy,
    Medium,
    Hard,
    Advanced,
    Search { depth: u8, algorithm: Algorithm },
}

impl Level {
    pub const MAX: u8 = 10;

    /// Like `parse`, but an unusable level falls back to medium.
    pub fn parse_lenient(s: &str) -> Level {
        s.parse().unwrap_or_else(|e: LevelParseError| {
            warn!(level = s, error = %e, "falling back to medium");
            Level::Medium
        })
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Level::Random | Level::Numeric(1) => Strategy::Random,
            Level::Easy | Level::Numeric(2) => Strategy::Easy,
            Level::Medium | Level::Numeric(3) => Strategy::Medium,
            Level::Hard | Level::Numeric(4) => Strategy::Hard,
            Level::Advanced | Level::Numeric(5) => Strategy::Advanced,
            Level::Numeric(6) => Strategy::Search {
                depth: 1,
                algorithm: Algorithm::Minimax,
            },
            Level::Numeric(7) => Strategy::Search {
                depth: 2,
                algorithm: Algorithm::Minimax,
            },
            Level::Numeric(8) => Strategy::Search {
                depth: 3,
                algorithm: Algorithm::AlphaBeta { quiescence: false },
            },
            Level::Numeric(9) => Strategy::Search {
                depth: 3,
                algorithm: Algorithm::AlphaBeta { quiescence: true },
            },
            // Out-of-range numbers cannot be parsed; clamp anything built by hand.
            Level::Numeric(0) => Strategy::Random,
            Level::Numeric(_) => Strategy::Search {
                depth: 4,
                algorithm: Algorithm::AlphaBeta { quiescence: true },
            },
        }
    }

    /// Nominal depth in plies, as reported in search results.
    pub fn depth(self) -> u8 {
        match self.strategy() {
            Strategy::Random | Strategy::Easy | Strategy::Medium => 0,
            Strategy::Hard => 1,
            Strategy::Advanced => 2,
            Strategy::Search { depth, .. } => depth,
        }
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(LevelParseError::Empty);
        }
        match s.as_str() {
            "random" => return Ok(Level::Random),
            "easy" => return Ok(Level::Easy),
            "medium" => return Ok(Level::Medium),
            "hard" => return Ok(Level::Hard),
            "advanced" => return Ok(Level::Advanced),
            _ => {}
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LevelParseError::UnknownName(s));
        }
        let digits = s.trim_start_matches('0');
        if digits.is_empty() {
            return Err(LevelParseError::OutOfRange(0));
        }
        match digits.parse::<u64>() {
            Ok(n @ 1..=10) => Ok(Level::Numeric(n as u8)),
            Ok(n) => Err(LevelParseError::OutOfRange(n)),
            Err(_) => Err(LevelParseError::OutOfRange(u64::MAX)),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = LevelParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> String {
        level.to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Random => f.write_str("random"),
            Level::Easy => f.write_str("easy"),
            Level::Medium => f.write_str("medium"),
            Level::Hard => f.write_str("hard"),
            Level::Advanced => f.write_str("advanced"),
            Level::Numeric(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod level_tests;
