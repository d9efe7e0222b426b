//! # Integer Matrix Core Library
//!
//! Dense `i32` matrices with checked construction, random population,
//! cellwise addition and cache-friendly multiplication.

// Declare modules
pub mod dense_matrix;
pub mod error;
pub mod random;
pub mod traits;

// Re-export public types
pub use dense_matrix::{IntMatrix, LINE_SEPARATOR};
pub use error::{MatrixError, Result};
pub use random::{RandomSource, ThreadRng, RANDOM_MAX, RANDOM_MIN};
pub use traits::Matrix;
