//! Error types for the remote-control host

use shared::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("tick rate must be between 1 and 1000 Hz, got {0}")]
    TickRate(u32),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
