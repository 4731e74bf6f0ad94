#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    #[error("store: {0}")]
    Store(#[from] memoria_store::StoreError),
    #[error("metadata: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
    #[error("maintenance: {0}")]
    Maintenance(#[from] memoria_maintenance::MaintenanceError),
}

pub type FacadeResult<T> = Result<T, FacadeError>;

impl From<FacadeError> for memoria_core::MemoriaError {
    fn from(e: FacadeError) -> Self {
        match e {
            FacadeError::Store(e) => e.into(),
            FacadeError::Metadata(e) => e.into(),
            FacadeError::Maintenance(e) => e.into(),
        }
    }
}
