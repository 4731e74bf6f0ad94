/// Record-store-layer errors, converted into `memoria_core::MemoriaError` at
/// every public boundary the way `cortex-storage`'s `StorageError` does.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("id collision: {0}")]
    IdCollision(String),

    #[error("corrupted record at {path}: {details}")]
    Corruption { path: String, details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for memoria_core::MemoriaError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => memoria_core::MemoriaError::NotFound(id),
            StoreError::InvalidId(id) => memoria_core::MemoriaError::InvalidId(id),
            StoreError::IdCollision(id) => memoria_core::MemoriaError::IdCollision(id),
            StoreError::Corruption { path, details } => {
                memoria_core::MemoriaError::Corruption { path, details }
            }
            StoreError::Io(err) => memoria_core::MemoriaError::Io(err),
        }
    }
}
