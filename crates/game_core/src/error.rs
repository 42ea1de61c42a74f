use thiserror::Error;

/// Failures of the parsing entry points. Rules queries never fail; they answer empty.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid move string: {0:?}")]
    InvalidMove(String),

    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("unknown game mode: {0:?}")]
    UnknownMode(String),

    #[error("malformed game snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
