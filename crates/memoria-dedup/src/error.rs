#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    #[error("metadata store error: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
}

pub type DedupResult<T> = Result<T, DedupError>;

impl From<DedupError> for memoria_core::MemoriaError {
    fn from(e: DedupError) -> Self {
        match e {
            DedupError::Metadata(inner) => inner.into(),
        }
    }
}
