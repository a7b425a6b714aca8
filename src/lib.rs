//! coomat: coordinate-format sparse matrices for assembling linear systems
//!
//! This crate provides a triplet (COO) sparse matrix with lazily amortized
//! compaction, an upper-triangular symmetric variant, and a Matrix Market
//! coordinate codec for handing systems to an external iterative solver and
//! reading its solution vector back.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod matrix;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use self::core::traits::*;
pub use error::*;
pub use io::*;
pub use matrix::*;
