use thiserror::Error;

/// Errors surfaced by the library outside the search core.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move `{0}` in this position")]
    IllegalMove(String),

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
