use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("PnL vector length mismatch: expected {expected} values, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    #[error("PnL vector is empty")]
    EmptyVector,
}
