//! Umbrella error type shared by every crate in the workspace.
//!
//! Each layer crate (`memoria-store`, `memoria-metadata`, ...) defines its own
//! narrower error enum and converts into `MemoriaError` at its public
//! boundary, the same way `cortex-core::CortexError` wraps `StorageError`,
//! `RetrievalError`, etc.

/// Result alias used throughout the workspace.
pub type MemoriaResult<T> = Result<T, MemoriaError>;

#[derive(Debug, thiserror::Error)]
pub enum MemoriaError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("id collision: {0}")]
    IdCollision(String),

    #[error("corrupted record at {path}: {details}")]
    Corruption { path: String, details: String },

    #[error("metadata store busy: {0}")]
    StoreTimeout(String),

    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MemoriaError {
    /// Exit code for CLI wrappers per the documented contract (§6).
    pub fn exit_code(&self) -> i32 {
        match self {
            MemoriaError::InvalidId(_) | MemoriaError::InvalidInput(_) => 1,
            MemoriaError::Io(_) => 2,
            MemoriaError::Corruption { .. } => 3,
            _ => 2,
        }
    }
}
