//! Tuning options for sparse matrix storage.
//!
//! This module provides the `CompactionPolicy` enum, which controls when the
//! accumulate path (`SparseMatrix::add`) reconciles its buffered triplets.
//! Reads, writes, and encoding always compact first regardless of the policy;
//! the policy only bounds how many unreconciled entries `add` may leave behind.

/// When `add` triggers an automatic compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompactionPolicy {
    /// Compact once the pending count exceeds `max(rows, cols)`.
    #[default]
    DimensionBound,
    /// Compact once the pending count exceeds the given number of entries.
    Fixed(usize),
    /// Never compact from `add`; compaction happens on the next read.
    Manual,
}

impl CompactionPolicy {
    /// Pending-entry threshold for a `rows × cols` matrix, or `None` for `Manual`.
    pub fn threshold(&self, rows: usize, cols: usize) -> Option<usize> {
        match *self {
            CompactionPolicy::DimensionBound => Some(rows.max(cols)),
            CompactionPolicy::Fixed(n) => Some(n),
            CompactionPolicy::Manual => None,
        }
    }

    /// Whether `pending` buffered entries should be compacted now.
    pub fn should_compact(&self, pending: usize, rows: usize, cols: usize) -> bool {
        self.threshold(rows, cols).is_some_and(|limit| pending > limit)
    }
}
