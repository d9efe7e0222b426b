use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimension(String),

    #[error("Invalid input grid: {0}")]
    InvalidInput(String),

    #[error("Missing operand for {0}")]
    NullArgument(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
}

pub type Result<T> = core::result::Result<T, MatrixError>;
