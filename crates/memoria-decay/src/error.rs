#[derive(Debug, thiserror::Error)]
pub enum DecayError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type DecayResult<T> = Result<T, DecayError>;

impl From<DecayError> for memoria_core::MemoriaError {
    fn from(e: DecayError) -> Self {
        match e {
            DecayError::InvalidInput(msg) => memoria_core::MemoriaError::InvalidInput(msg),
        }
    }
}
