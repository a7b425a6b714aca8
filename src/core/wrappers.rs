//! Capability impls for `faer` dense matrices and `Vec<T>`.
//!
//! These let dense operands (a `faer::Mat` system matrix, or a plain `Vec` right-hand
//! side) go through the coordinate codec next to the sparse types. Neither offers the
//! nonzero fast path, so the encoder scans them element by element.

use crate::core::traits::{CoordinateSource, MatShape, MatrixGet};
use faer::Mat;

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

impl<T: Copy> MatrixGet<T> for Mat<T> {
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T: Copy> CoordinateSource<T> for Mat<T> {}

/// A `Vec<T>` is treated as a column vector.
impl<T> MatShape for Vec<T> {
    fn nrows(&self) -> usize {
        self.len()
    }
    fn ncols(&self) -> usize {
        1
    }
}

impl<T: Copy> MatrixGet<T> for Vec<T> {
    fn get(&self, i: usize, _j: usize) -> T {
        self[i]
    }
}

impl<T: Copy> CoordinateSource<T> for Vec<T> {}
