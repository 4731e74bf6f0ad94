/// Metadata-store-layer errors, mirroring `cortex-storage`'s own
/// `to_storage_err` convention of flattening `rusqlite::Error` into a single
/// string-carrying variant at the call site.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("metadata store error: {0}")]
    Query(String),

    #[error("metadata store busy: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MetadataResult<T> = Result<T, MetadataError>;

pub(crate) fn to_metadata_err(msg: impl std::fmt::Display) -> MetadataError {
    MetadataError::Query(msg.to_string())
}

impl From<MetadataError> for memoria_core::MemoriaError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound(id) => memoria_core::MemoriaError::NotFound(id),
            MetadataError::Query(msg) => memoria_core::MemoriaError::StoreTimeout(msg),
            MetadataError::Timeout(msg) => memoria_core::MemoriaError::StoreTimeout(msg),
            MetadataError::Io(err) => memoria_core::MemoriaError::Io(err),
        }
    }
}
