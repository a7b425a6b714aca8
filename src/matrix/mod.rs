//! Matrix module: coordinate-format sparse matrices.

pub mod dense;
pub mod sparse;
pub mod symmetric;
pub mod triplet;

pub use sparse::SparseMatrix;
pub use symmetric::SymmetricSparseMatrix;
pub use triplet::{Triplet, TripletStore};
