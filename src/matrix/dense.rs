//! Conversions between `SparseMatrix` and `faer` dense matrices.

use faer::Mat;

use crate::error::Result;
use crate::matrix::sparse::{SparseMatrix, check_dims, check_value};
use crate::matrix::triplet::{TripletStore, position};

impl SparseMatrix {
    /// Build from a dense matrix, keeping only its nonzeros.
    ///
    /// Fails on empty shapes and on NaN or infinite elements.
    pub fn from_dense(a: &Mat<f64>) -> Result<Self> {
        let (rows, cols) = (a.nrows(), a.ncols());
        check_dims(rows, cols)?;
        let mut store = TripletStore::new();
        // column-major walk pushes positions already sorted
        for j in 0..cols {
            for i in 0..rows {
                let v = a[(i, j)];
                check_value(v)?;
                if v != 0.0 {
                    store.push(position(i, j, rows), v);
                }
            }
        }
        let m = SparseMatrix::from_store(rows, cols, Default::default(), store);
        m.compact();
        Ok(m)
    }

    /// Dense copy of the matrix.
    pub fn to_dense(&self) -> Mat<f64> {
        let mut out = Mat::<f64>::zeros(self.nrows(), self.ncols());
        for (r, c, v) in self.triplets() {
            out[(r, c)] = v;
        }
        out
    }
}
