//! General coordinate-format sparse matrix.
//!
//! `SparseMatrix` buffers writes in a [`TripletStore`] and compacts lazily. The
//! accumulate path (`add`) never searches; `at`, `set`, `transpose`, formatting and
//! encoding compact first and then binary-search the sorted triplets.
//!
//! Compaction on a read mutates the storage layout, so the store lives behind a
//! `RefCell`: the matrix is `Send` but not `Sync`. Share it across threads only
//! behind an external lock.

use std::cell::RefCell;
use std::fmt;

use crate::config::CompactionPolicy;
use crate::core::traits::{CoordinateSource, MatShape, MatrixGet};
use crate::error::{CooError, Result};
use crate::matrix::triplet::{Triplet, TripletStore, position};
use crate::utils::format::format_sci;

/// Sparse `rows × cols` matrix of `f64` in coordinate format.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    policy: CompactionPolicy,
    store: RefCell<TripletStore>,
}

impl SparseMatrix {
    /// Empty `rows × cols` matrix with the default compaction policy.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_policy(rows, cols, CompactionPolicy::default())
    }

    /// Empty `rows × cols` matrix compacting from `add` according to `policy`.
    pub fn with_policy(rows: usize, cols: usize, policy: CompactionPolicy) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self::from_store(rows, cols, policy, TripletStore::new()))
    }

    pub(crate) fn from_store(
        rows: usize,
        cols: usize,
        policy: CompactionPolicy,
        store: TripletStore,
    ) -> Self {
        Self {
            rows,
            cols,
            policy,
            store: RefCell::new(store),
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn policy(&self) -> CompactionPolicy {
        self.policy
    }

    /// Value at `(r, c)`; zero when nothing is stored there.
    pub fn at(&self, r: usize, c: usize) -> Result<f64> {
        self.check(r, c)?;
        Ok(self.lookup(r, c))
    }

    /// Overwrite the element at `(r, c)`.
    pub fn set(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        self.check(r, c)?;
        check_value(value)?;
        let pos = position(r, c, self.rows);
        let store = self.store.get_mut();
        store.compact();
        match store.search(pos) {
            Ok(i) => {
                store.entries_mut()[i].value = value;
                if value == 0.0 {
                    store.mark_dirty();
                }
            }
            // never auto-compacts: a set leaves at most one pending entry
            Err(_) if value != 0.0 => store.push(pos, value),
            Err(_) => {}
        }
        Ok(())
    }

    /// Accumulate `value` into `(r, c)`: the cheap alternative to
    /// `set(r, c, at(r, c)? + value)`.
    ///
    /// The value is appended without searching; duplicates are summed on the next
    /// compaction, which `add` itself triggers once the policy threshold is passed.
    pub fn add(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        self.check(r, c)?;
        check_value(value)?;
        if value == 0.0 {
            return Ok(());
        }
        let pos = position(r, c, self.rows);
        let store = self.store.get_mut();
        store.push(pos, value);
        if self.policy.should_compact(store.pending(), self.rows, self.cols) {
            store.compact();
        }
        Ok(())
    }

    /// Zero every element on row `rc` and on column `rc`.
    ///
    /// `rc` must be both a valid row and a valid column. The zeroed triplets stay in
    /// place until the next compaction removes them.
    pub fn zero_row_column(&mut self, rc: usize) -> Result<()> {
        self.check(rc, rc)?;
        let rows = self.rows;
        let store = self.store.get_mut();
        for t in store.entries_mut() {
            let (r, c) = t.row_col(rows);
            if r == rc || c == rc {
                t.value = 0.0;
            }
        }
        store.mark_dirty();
        Ok(())
    }

    /// Reconcile all buffered writes now. Idempotent.
    pub fn compact(&self) {
        self.store.borrow_mut().compact();
    }

    /// Number of entries written since the last compaction.
    ///
    /// Values zeroed in place by `zero_row_column` are not counted; use `is_clean`
    /// to ask whether any reconciliation is outstanding.
    pub fn pending(&self) -> usize {
        self.store.borrow().pending()
    }

    /// Whether storage is in canonical form: sorted, no duplicates, no zeros.
    pub fn is_clean(&self) -> bool {
        self.store.borrow().is_clean()
    }

    /// Number of stored nonzeros.
    pub fn nnz(&self) -> usize {
        self.with_triplets(|ts| ts.len())
    }

    /// Nonzero elements as `(row, col, value)`, in row-major order.
    pub fn triplets(&self) -> Vec<(usize, usize, f64)> {
        let rows = self.rows;
        let mut out: Vec<_> = self.with_triplets(|ts| {
            ts.iter()
                .map(|t| {
                    let (r, c) = t.row_col(rows);
                    (r, c, t.value)
                })
                .collect()
        });
        out.sort_unstable_by_key(|&(r, c, _)| (r, c));
        out
    }

    /// A new `cols × rows` matrix holding the transpose.
    pub fn transpose(&self) -> SparseMatrix {
        let (rows, cols) = (self.rows, self.cols);
        let swapped: Vec<Triplet> = self.with_triplets(|ts| {
            ts.iter()
                .map(|t| {
                    let (r, c) = t.row_col(rows);
                    Triplet {
                        position: position(c, r, cols),
                        value: t.value,
                    }
                })
                .collect()
        });
        let out =
            SparseMatrix::from_store(cols, rows, self.policy, TripletStore::from_triplets(swapped));
        out.compact();
        out
    }

    /// Compact, then run `f` over the canonical column-major triplets.
    pub(crate) fn with_triplets<R>(&self, f: impl FnOnce(&[Triplet]) -> R) -> R {
        let mut store = self.store.borrow_mut();
        store.compact();
        f(store.entries())
    }

    pub(crate) fn check(&self, r: usize, c: usize) -> Result<()> {
        if r >= self.rows || c >= self.cols {
            return Err(CooError::IndexOutOfRange {
                row: r,
                col: c,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn lookup(&self, r: usize, c: usize) -> f64 {
        let pos = position(r, c, self.rows);
        self.with_triplets(|ts| match ts.binary_search_by_key(&pos, |t| t.position) {
            Ok(i) => ts[i].value,
            Err(_) => 0.0,
        })
    }
}

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<()> {
    let fits = (rows as u64).checked_mul(cols as u64).is_some();
    if rows == 0 || cols == 0 || !fits {
        return Err(CooError::Dimension { rows, cols });
    }
    Ok(())
}

pub(crate) fn check_value(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CooError::InvalidValue(value));
    }
    Ok(())
}

/// Value equality: same shape and the same nonzeros.
impl PartialEq for SparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        if self.dims() != other.dims() {
            return false;
        }
        self.compact();
        other.compact();
        self.store.borrow().entries() == other.store.borrow().entries()
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amount of rows    : {:5}", self.rows)?;
        writeln!(f, "Amount of columns : {:5}", self.cols)?;
        writeln!(f, "{:<6} {:<6} {:>20}", "row", "column", "value")?;
        for (r, c, v) in self.triplets() {
            writeln!(f, "{:<6} {:<6} {:<20}", r, c, format_sci(v, 15))?;
        }
        Ok(())
    }
}

impl MatShape for SparseMatrix {
    fn nrows(&self) -> usize {
        self.rows
    }
    fn ncols(&self) -> usize {
        self.cols
    }
}

impl MatrixGet<f64> for SparseMatrix {
    fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.lookup(i, j)
    }
}

impl CoordinateSource<f64> for SparseMatrix {
    fn nonzero_entries(&self) -> Option<Vec<(usize, usize, f64)>> {
        Some(self.triplets())
    }
}
