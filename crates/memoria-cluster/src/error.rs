#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("store: {0}")]
    Store(#[from] memoria_store::StoreError),
    #[error("metadata: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
}

pub type ClusterResult<T> = Result<T, ClusterError>;

impl From<ClusterError> for memoria_core::MemoriaError {
    fn from(e: ClusterError) -> Self {
        match e {
            ClusterError::Store(e) => e.into(),
            ClusterError::Metadata(e) => e.into(),
        }
    }
}
