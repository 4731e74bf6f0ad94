#[derive(Debug, thiserror::Error)]
pub enum ConsolidationError {
    #[error("store: {0}")]
    Store(#[from] memoria_store::StoreError),
    #[error("metadata: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
    #[error("dedup: {0}")]
    Dedup(#[from] memoria_dedup::DedupError),
}

pub type ConsolidationResult<T> = Result<T, ConsolidationError>;

impl From<ConsolidationError> for memoria_core::MemoriaError {
    fn from(e: ConsolidationError) -> Self {
        match e {
            ConsolidationError::Store(e) => e.into(),
            ConsolidationError::Metadata(e) => e.into(),
            ConsolidationError::Dedup(e) => e.into(),
        }
    }
}
