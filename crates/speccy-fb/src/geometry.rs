//! Logical to physical addressing
//!
//! The panel is mounted rotated relative to the drawing surface. Instead of a
//! rotation transform the store is laid out transposed: logical column `x`
//! is physical row `x`, and logical row `y` is physical column
//! `(height - 1) - y`. A physical row is therefore one logical column read
//! bottom to top, which is exactly the order the panel scans it in.

use core::ops::Range;

use crate::config::Dimensions;

/// Position of a pixel in the transposed store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StorageCell {
    pub row: usize,
    pub column: usize,
}

/// Address arithmetic for a store of the given logical size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
}

impl Layout {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            width: dims.width as usize,
            height: dims.height as usize,
        }
    }

    /// Number of physical rows (logical width)
    pub fn rows(&self) -> usize {
        self.width
    }

    /// Pixels per physical row (logical height)
    pub fn row_len(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Map a logical coordinate, `None` when off the surface
    pub fn locate(&self, x: i32, y: i32) -> Option<StorageCell> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(StorageCell {
            row: x,
            column: self.column_of(y),
        })
    }

    /// Physical column holding logical row `y` (`y` must be in range)
    pub fn column_of(&self, y: usize) -> usize {
        (self.height - 1) - y
    }

    /// Flat store index of a cell
    pub fn index(&self, cell: StorageCell) -> usize {
        cell.row * self.height + cell.column
    }

    /// Store range covered by physical rows `rows`
    pub fn row_span(&self, rows: Range<usize>) -> Range<usize> {
        rows.start * self.height..rows.end * self.height
    }

    /// Inverse mapping
    #[cfg(test)]
    pub fn logical(&self, cell: StorageCell) -> (i32, i32) {
        (cell.row as i32, ((self.height - 1) - cell.column) as i32)
    }
}

/// Clip the span `start..start + len` against `0..limit`
///
/// A negative start shrinks the span from that edge, overflow past `limit`
/// truncates it. Empty results (including `len <= 0`) are `None`.
pub fn clip_span(start: i32, len: i32, limit: usize) -> Option<Range<usize>> {
    if len <= 0 {
        return None;
    }
    let begin = i64::from(start).max(0);
    let end = (i64::from(start) + i64::from(len)).min(limit as i64);
    if begin >= end {
        return None;
    }
    Some(begin as usize..end as usize)
}
