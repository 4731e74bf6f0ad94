#[derive(Debug, thiserror::Error)]
pub enum ReinforcementError {
    #[error("metadata store error: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
}

pub type ReinforcementResult<T> = Result<T, ReinforcementError>;

impl From<ReinforcementError> for memoria_core::MemoriaError {
    fn from(e: ReinforcementError) -> Self {
        match e {
            ReinforcementError::Metadata(inner) => inner.into(),
        }
    }
}
