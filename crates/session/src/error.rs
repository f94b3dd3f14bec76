use std::path::PathBuf;

use chess_core::GameError;
use thiserror::Error;

/// Failure to read or parse a session configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    /// The blocking search task panicked or was aborted by the runtime.
    #[error("search task failed: {0}")]
    SearchFailed(#[from] tokio::task::JoinError),
}
