//! Play session on top of the rules engine and the classical computer player.
//!
//! A [`Session`] owns one game. Computer moves are searched on Tokio's
//! blocking pool over a copy of the position, so the caller stays responsive
//! and can cancel them.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use session::{MoveOption, SearchReply, SearchTask, Session};

pub use classical_engine::Level;
