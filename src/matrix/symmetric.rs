//! Symmetric sparse matrix with upper-triangular storage.
//!
//! Only elements with `row <= col` are stored. Reads below the diagonal are
//! served from the mirrored upper element.

use std::fmt;

use crate::config::CompactionPolicy;
use crate::core::traits::{CoordinateSource, MatShape, MatrixGet};
use crate::error::{CooError, Result};
use crate::matrix::sparse::SparseMatrix;
use crate::matrix::triplet::{TripletStore, position};

/// Symmetric `size × size` sparse matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricSparseMatrix {
    inner: SparseMatrix,
}

impl SymmetricSparseMatrix {
    pub fn new(size: usize) -> Result<Self> {
        Self::with_policy(size, CompactionPolicy::default())
    }

    pub fn with_policy(size: usize, policy: CompactionPolicy) -> Result<Self> {
        let inner = SparseMatrix::with_policy(size, size, policy)?;
        Ok(Self { inner })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.inner.nrows()
    }

    pub fn dims(&self) -> (usize, usize) {
        self.inner.dims()
    }

    /// Upper-triangular storage.
    pub fn inner(&self) -> &SparseMatrix {
        &self.inner
    }

    pub fn at(&self, r: usize, c: usize) -> Result<f64> {
        if r > c {
            return self.inner.at(c, r);
        }
        self.inner.at(r, c)
    }

    /// Overwrite the element at `(r, c)` and, implicitly, `(c, r)`. Requires `r <= c`.
    pub fn set_sym(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        self.check_upper(r, c)?;
        self.inner.set(r, c, value)
    }

    /// Accumulate into `(r, c)` and, implicitly, `(c, r)`. Requires `r <= c`.
    pub fn add_sym(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        self.check_upper(r, c)?;
        self.inner.add(r, c, value)
    }

    pub fn zero_row_column(&mut self, rc: usize) -> Result<()> {
        self.inner.zero_row_column(rc)
    }

    pub fn compact(&self) {
        self.inner.compact();
    }

    /// A symmetric matrix is its own transpose: this is a copy.
    pub fn transpose(&self) -> SymmetricSparseMatrix {
        self.clone()
    }

    /// Expand both triangles into a general sparse matrix.
    pub fn to_full(&self) -> SparseMatrix {
        let n = self.size();
        let mut store = TripletStore::with_capacity(2 * self.inner.nnz());
        for (r, c, v) in self.inner.triplets() {
            store.push(position(r, c, n), v);
            if r != c {
                store.push(position(c, r, n), v);
            }
        }
        let full = SparseMatrix::from_store(n, n, self.inner.policy(), store);
        full.compact();
        full
    }

    fn check_upper(&self, r: usize, c: usize) -> Result<()> {
        self.inner.check(r, c)?;
        if r > c {
            return Err(CooError::AsymmetryViolation { row: r, col: c });
        }
        Ok(())
    }
}

impl fmt::Display for SymmetricSparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl MatShape for SymmetricSparseMatrix {
    fn nrows(&self) -> usize {
        self.size()
    }
    fn ncols(&self) -> usize {
        self.size()
    }
}

impl MatrixGet<f64> for SymmetricSparseMatrix {
    fn get(&self, i: usize, j: usize) -> f64 {
        if i > j {
            self.inner.get(j, i)
        } else {
            self.inner.get(i, j)
        }
    }
}

impl CoordinateSource<f64> for SymmetricSparseMatrix {
    fn nonzero_entries(&self) -> Option<Vec<(usize, usize, f64)>> {
        Some(self.to_full().triplets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [[f64; 3]; 3] = [[8.0, 1.0, 6.0], [1.0, 5.0, 7.0], [6.0, 7.0, 2.0]];

    fn filled() -> SymmetricSparseMatrix {
        let mut s = SymmetricSparseMatrix::new(3).unwrap();
        for i in 0..3 {
            for j in i..3 {
                s.add_sym(i, j, A[i][j] / 2.0).unwrap();
                s.add_sym(i, j, A[i][j] / 2.0).unwrap();
            }
        }
        s
    }

    #[test]
    fn mirrors_lower_reads() {
        let s = filled();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(s.at(i, j).unwrap(), A[i][j]);
                assert_eq!(s.at(i, j).unwrap(), s.at(j, i).unwrap());
            }
        }
        assert_eq!(s.inner().nnz(), 6);
    }

    #[test]
    fn rejects_lower_writes() {
        let mut s = SymmetricSparseMatrix::new(3).unwrap();
        assert_eq!(
            s.set_sym(2, 1, 1.0).unwrap_err(),
            CooError::AsymmetryViolation { row: 2, col: 1 }
        );
        assert_eq!(
            s.add_sym(1, 0, 1.0).unwrap_err(),
            CooError::AsymmetryViolation { row: 1, col: 0 }
        );
        assert!(matches!(
            s.set_sym(3, 1, 1.0),
            Err(CooError::IndexOutOfRange { .. })
        ));
        assert_eq!(s.inner().nnz(), 0);
    }

    #[test]
    fn zero_row_column() {
        let mut s = filled();
        s.zero_row_column(0).unwrap();
        for k in 0..3 {
            assert_eq!(s.at(0, k).unwrap(), 0.0);
            assert_eq!(s.at(k, 0).unwrap(), 0.0);
        }
        assert_eq!(s.at(1, 2).unwrap(), 7.0);
        assert_eq!(s.at(2, 1).unwrap(), 7.0);
        assert_eq!(s.at(2, 2).unwrap(), 2.0);
    }

    #[test]
    fn transpose_is_copy() {
        let s = filled();
        let t = s.transpose();
        assert_eq!(t, s);
        assert_eq!(t.dims(), (3, 3));
    }

    #[test]
    fn to_full_expands_both_triangles() {
        let full = filled().to_full();
        assert_eq!(full.nnz(), 9);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(full.at(i, j).unwrap(), A[i][j]);
            }
        }
    }
}
