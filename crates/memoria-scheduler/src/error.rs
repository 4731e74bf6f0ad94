#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("metadata store error: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl From<SchedulerError> for memoria_core::MemoriaError {
    fn from(e: SchedulerError) -> Self {
        match e {
            SchedulerError::Metadata(inner) => inner.into(),
        }
    }
}
