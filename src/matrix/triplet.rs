//! Triplet storage with deferred compaction.
//!
//! Writes are appended to an unsorted buffer and reconciled later: `compact` sorts
//! the buffer by position, sums runs of equal positions, and drops zero entries.
//! This keeps the accumulate path O(1) while reads pay an amortized O(n log n).
//!
//! ```text
//! [row column value]
//! appended  : [1 1 0.1] [1 2 0.5] [1 1 0.5]
//! summed    : [1 1 0.6] [1 1 0.0] [1 2 0.5]
//! compacted : [1 1 0.6] [1 2 0.5]
//! ```

use log::trace;

/// One stored element: column-major `position = row + col * rows` and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    pub position: u64,
    pub value: f64,
}

impl Triplet {
    /// Decode the position into `(row, col)` for a matrix with `rows` rows.
    #[inline]
    pub fn row_col(&self, rows: usize) -> (usize, usize) {
        let rows = rows as u64;
        ((self.position % rows) as usize, (self.position / rows) as usize)
    }
}

/// Column-major linear index of `(row, col)`.
#[inline]
pub fn position(row: usize, col: usize, rows: usize) -> u64 {
    row as u64 + col as u64 * rows as u64
}

/// Append-only triplet buffer, compacted on demand.
///
/// While clean, entries are sorted strictly by position and hold no zeros.
#[derive(Debug, Clone, Default)]
pub struct TripletStore {
    entries: Vec<Triplet>,
    /// Entries appended since the last compaction.
    pending: usize,
    /// Forces the next `compact` regardless of `pending` (values were zeroed in place).
    dirty: bool,
}

impl TripletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            pending: 0,
            dirty: false,
        }
    }

    /// Take ownership of arbitrary triplets; the store starts dirty.
    pub fn from_triplets(entries: Vec<Triplet>) -> Self {
        Self {
            entries,
            pending: 0,
            dirty: true,
        }
    }

    /// Append without searching. Duplicates and zeros are resolved by `compact`.
    pub fn push(&mut self, position: u64, value: f64) {
        self.entries.push(Triplet { position, value });
        self.pending += 1;
    }

    /// Number of entries appended since the last compaction.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_clean(&self) -> bool {
        self.pending == 0 && !self.dirty
    }

    /// Stored entries, including unreconciled ones when not clean.
    pub fn entries(&self) -> &[Triplet] {
        &self.entries
    }

    /// Mutable access to stored values. Callers that change values must `mark_dirty`.
    pub fn entries_mut(&mut self) -> &mut [Triplet] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binary search for `position`. Only meaningful on a clean store.
    pub fn search(&self, position: u64) -> Result<usize, usize> {
        debug_assert!(self.is_clean(), "search on an uncompacted triplet store");
        self.entries.binary_search_by_key(&position, |t| t.position)
    }

    /// Restore the canonical form: sorted, unique positions, no zero values.
    ///
    /// Equal positions are summed in append order, so rounding is reproducible for
    /// a given sequence of writes. No-op on a clean store.
    pub fn compact(&mut self) {
        if self.is_clean() {
            return;
        }
        let before = self.entries.len();

        // stable: keeps append order inside runs of equal position
        self.entries.sort_by_key(|t| t.position);

        let ts = &mut self.entries;
        let mut head = 0;
        while head < ts.len() {
            let mut next = head + 1;
            while next < ts.len() && ts[next].position == ts[head].position {
                ts[head].value += ts[next].value;
                ts[next].value = 0.0;
                next += 1;
            }
            head = next;
        }

        // also drops -0.0
        ts.retain(|t| t.value != 0.0);

        self.pending = 0;
        self.dirty = false;

        debug_assert!(
            self.entries.windows(2).all(|w| w[0].position < w[1].position),
            "internal invariant violation: duplicate position survived compaction: {:?}",
            self.entries,
        );
        trace!("compacted triplet store: {} -> {} entries", before, self.entries.len());
    }
}
