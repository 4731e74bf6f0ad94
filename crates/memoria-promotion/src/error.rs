#[derive(Debug, thiserror::Error)]
pub enum PromotionError {
    #[error("store: {0}")]
    Store(#[from] memoria_store::StoreError),
    #[error("metadata: {0}")]
    Metadata(#[from] memoria_metadata::MetadataError),
    #[error("scheduler: {0}")]
    Scheduler(#[from] memoria_scheduler::SchedulerError),
}

pub type PromotionResult<T> = Result<T, PromotionError>;

impl From<PromotionError> for memoria_core::MemoriaError {
    fn from(e: PromotionError) -> Self {
        match e {
            PromotionError::Store(e) => e.into(),
            PromotionError::Metadata(e) => e.into(),
            PromotionError::Scheduler(e) => e.into(),
        }
    }
}
