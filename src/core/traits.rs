//! Core matrix capability traits for coomat.

/// Shape of a matrix (a vector is `n × 1`).
pub trait MatShape {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
    /// `(rows, cols)`.
    fn dims(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

/// Element access at `(i, j)`. Callers keep `i < nrows()` and `j < ncols()`.
pub trait MatrixGet<T> {
    fn get(&self, i: usize, j: usize) -> T;
}

/// A matrix that can be written out entry by entry.
///
/// `nonzero_entries` is an optional fast path: types that already hold their
/// nonzeros (sparse storage) return them directly, in row-major order, with
/// 0-based indices. Everything else keeps the default `None` and is scanned
/// densely through `get`.
pub trait CoordinateSource<T>: MatShape + MatrixGet<T> {
    fn nonzero_entries(&self) -> Option<Vec<(usize, usize, T)>> {
        None
    }
}
