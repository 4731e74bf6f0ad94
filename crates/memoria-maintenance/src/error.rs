#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("store: {0}")]
    Store(#[from] memoria_store::StoreError),
    #[error("metadata: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
}

pub type MaintenanceResult<T> = Result<T, MaintenanceError>;

impl From<MaintenanceError> for memoria_core::MemoriaError {
    fn from(e: MaintenanceError) -> Self {
        match e {
            MaintenanceError::Store(e) => e.into(),
            MaintenanceError::Metadata(e) => e.into(),
        }
    }
}
