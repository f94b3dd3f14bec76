//! Session settings, usually read from a TOML file.
//!
//! ```toml
//! computer_black = true
//! level = "9"
//!
//! [draw_rules]
//! threefold = 3
//!
//! [search]
//! advanced_reply_cap = 8
//! ```

use std::path::Path;

use chess_core::DrawRules;
use classical_engine::{EvalConfig, Level, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub computer_white: bool,
    pub computer_black: bool,
    /// Level used by [`crate::Session::computer_turn`].
    pub level: Level,
    pub draw_rules: DrawRules,
    pub eval: EvalConfig,
    pub search: SearchConfig,
    /// Seed for the computer's random choices; unset means fresh entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
