#[derive(Debug, thiserror::Error)]
pub enum ContradictionError {
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),
}

pub type ContradictionResult<T> = Result<T, ContradictionError>;

impl From<ContradictionError> for memoria_core::MemoriaError {
    fn from(e: ContradictionError) -> Self {
        match e {
            ContradictionError::OracleUnavailable(msg) => memoria_core::MemoriaError::OracleUnavailable(msg),
        }
    }
}
