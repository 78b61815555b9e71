//! Per-row dirty tracking across two frames.
//!
//! Pure bookkeeping (no pixels, no sink) so the run coalescing can be
//! unit-tested on its own.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Range;

use crate::error::Error;

/// A maximal block of consecutive rows to retransmit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRun {
    pub start: usize,
    pub len: usize,
}

impl RowRun {
    pub fn rows(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Dirty flags for the frame being drawn and the one before it
#[derive(Debug)]
pub struct DirtyRows {
    current: Vec<bool>,
    previous: Vec<bool>,
}

impl DirtyRows {
    /// Allocate tables for `rows` rows, all clean
    pub fn new(rows: usize) -> Result<Self, Error> {
        Ok(Self {
            current: alloc_flags(rows)?,
            previous: alloc_flags(rows)?,
        })
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Forget this frame's changes
    pub fn reset_current(&mut self) {
        self.current.fill(false);
    }

    /// Mark both frames fully dirty
    pub fn mark_all(&mut self) {
        self.current.fill(true);
        self.previous.fill(true);
    }

    pub fn mark(&mut self, row: usize) {
        if let Some(flag) = self.current.get_mut(row) {
            *flag = true;
        }
    }

    pub fn mark_range(&mut self, rows: Range<usize>) {
        if let Some(flags) = self.current.get_mut(rows) {
            flags.fill(true);
        }
    }

    pub fn is_dirty(&self, row: usize) -> bool {
        self.current.get(row).copied().unwrap_or(false)
    }

    pub fn was_dirty(&self, row: usize) -> bool {
        self.previous.get(row).copied().unwrap_or(false)
    }

    /// Row needs sending this frame
    pub fn is_active(&self, row: usize, include_previous: bool) -> bool {
        self.is_dirty(row) || (include_previous && self.was_dirty(row))
    }

    /// Coalesce active rows into maximal runs, in row order
    pub fn runs(&self, include_previous: bool) -> RowRuns<'_> {
        RowRuns {
            dirty: self,
            include_previous,
            next: 0,
        }
    }

    /// Snapshot this frame into the previous one and start clean
    pub fn advance(&mut self) {
        self.previous.copy_from_slice(&self.current);
        self.current.fill(false);
    }
}

fn alloc_flags(rows: usize) -> Result<Vec<bool>, Error> {
    let mut flags = Vec::new();
    flags
        .try_reserve_exact(rows)
        .map_err(|_| Error::OutOfMemory { bytes: rows })?;
    flags.resize(rows, false);
    Ok(flags)
}

/// Iterator over [`RowRun`]s, see [`DirtyRows::runs`]
pub struct RowRuns<'a> {
    dirty: &'a DirtyRows,
    include_previous: bool,
    next: usize,
}

impl Iterator for RowRuns<'_> {
    type Item = RowRun;

    fn next(&mut self) -> Option<RowRun> {
        let dirty = self.dirty;
        let include_previous = self.include_previous;
        let rows = dirty.len();
        let active = |row| dirty.is_active(row, include_previous);

        let start = (self.next..rows).find(|&row| active(row))?;
        let end = (start..rows).find(|&row| !active(row)).unwrap_or(rows);
        self.next = end;
        Some(RowRun {
            start,
            len: end - start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn collect(dirty: &DirtyRows, include_previous: bool) -> Vec<RowRun> {
        dirty.runs(include_previous).collect()
    }

    #[test]
    fn clean_table_has_no_runs() {
        let dirty = DirtyRows::new(8).unwrap();
        assert!(collect(&dirty, true).is_empty());
    }

    #[test]
    fn adjacent_rows_coalesce() {
        let mut dirty = DirtyRows::new(10).unwrap();
        dirty.mark(1);
        dirty.mark(2);
        dirty.mark(3);
        dirty.mark(7);
        dirty.mark(9);
        assert_eq!(
            collect(&dirty, false),
            vec![
                RowRun { start: 1, len: 3 },
                RowRun { start: 7, len: 1 },
                RowRun { start: 9, len: 1 },
            ]
        );
    }

    #[test]
    fn previous_rows_only_count_when_requested() {
        let mut dirty = DirtyRows::new(6).unwrap();
        dirty.mark_range(0..2);
        dirty.advance();
        dirty.mark(2);

        assert_eq!(collect(&dirty, false), vec![RowRun { start: 2, len: 1 }]);
        assert_eq!(collect(&dirty, true), vec![RowRun { start: 0, len: 3 }]);
    }

    #[test]
    fn advance_snapshots_and_resets() {
        let mut dirty = DirtyRows::new(4).unwrap();
        dirty.mark(3);
        dirty.advance();
        assert!(!dirty.is_dirty(3));
        assert!(dirty.was_dirty(3));
        dirty.advance();
        assert!(!dirty.was_dirty(3));
    }

    #[test]
    fn mark_all_covers_both_frames() {
        let mut dirty = DirtyRows::new(5).unwrap();
        dirty.mark_all();
        dirty.reset_current();
        assert_eq!(collect(&dirty, false), vec![]);
        assert_eq!(collect(&dirty, true), vec![RowRun { start: 0, len: 5 }]);
    }

    #[test]
    fn out_of_range_marks_are_ignored() {
        let mut dirty = DirtyRows::new(3).unwrap();
        dirty.mark(3);
        dirty.mark_range(2..9);
        assert_eq!(collect(&dirty, false), vec![]);
    }
}
