//! Monotonic cumulative-offset tables.
//!
//! One table per axis band: positions are stored densely, indexed by row or
//! column, with one synthetic terminal entry at index N holding the end of
//! the last band. Range queries then never special-case the boundary.

use crate::error::{LayoutError, Result};

/// Cumulative positions for one axis band, keyed by index `0..=N`.
///
/// Populated by the geometry pass; until then every query reports
/// [`LayoutError::MissingGeometry`]. Entries are monotonically
/// non-decreasing since band sizes are never negative.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    axis: &'static str,
    offsets: Vec<f32>,
}

impl OffsetTable {
    /// Create an empty table. `axis` names the axis in diagnostics
    /// ("row" or "column").
    pub fn new(axis: &'static str) -> Self {
        Self {
            axis,
            offsets: Vec::new(),
        }
    }

    /// Drop all entries, keeping allocated capacity for the next pass.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }

    /// Reserve room for `count` entries plus the terminal entry.
    pub fn reserve(&mut self, count: usize) {
        self.offsets.reserve(count + 1);
    }

    /// Append the next entry. Entries must arrive in index order.
    pub fn push(&mut self, value: f32) {
        debug_assert!(
            self.offsets.last().is_none_or(|last| value >= *last),
            "offset table must stay monotonic"
        );
        self.offsets.push(value);
    }

    /// Store or overwrite one entry. Writing at the current length appends.
    pub fn set(&mut self, index: usize, value: f32) {
        if index == self.offsets.len() {
            self.offsets.push(value);
        } else if let Some(slot) = self.offsets.get_mut(index) {
            *slot = value;
        } else {
            debug_assert!(false, "offset write past table end: {index}");
        }
    }

    /// Number of stored entries, including the terminal entry.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if no geometry pass has populated the table.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Position of entry `index`, if populated.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.offsets.get(index).copied()
    }

    /// The terminal entry: total content extent along this band.
    pub fn terminal(&self) -> Option<f32> {
        self.offsets.last().copied()
    }

    /// The half-open interval `[offset[index], offset[index + 1])`.
    ///
    /// Fails with `MissingGeometry` if either bound is absent, signalling
    /// that no geometry pass has populated this index yet.
    pub fn range(&self, index: usize) -> Result<(f32, f32)> {
        let min = self.get(index).ok_or(LayoutError::MissingGeometry {
            axis: self.axis,
            index,
        })?;
        let max = self.get(index + 1).ok_or(LayoutError::MissingGeometry {
            axis: self.axis,
            index: index + 1,
        })?;
        Ok((min, max))
    }

    /// Size of band `index`; 0 when the range is missing.
    pub fn extent(&self, index: usize) -> f32 {
        self.range(index).map_or(0.0, |(min, max)| max - min)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn table_of(values: &[f32]) -> OffsetTable {
        let mut table = OffsetTable::new("column");
        for &value in values {
            table.push(value);
        }
        table
    }

    #[test]
    fn test_range_for_populated_index() {
        let table = table_of(&[0.0, 100.0, 250.0]);
        assert_eq!(table.range(0).unwrap(), (0.0, 100.0));
        assert_eq!(table.range(1).unwrap(), (100.0, 250.0));
    }

    #[test]
    fn test_range_missing_entry() {
        let table = table_of(&[0.0, 100.0]);
        let err = table.range(1).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingGeometry {
                axis: "column",
                index: 2
            }
        ));
        assert!(table_of(&[]).range(0).is_err());
    }

    #[test_case(&[0.0, 100.0, 250.0], 0, 100.0; "first band")]
    #[test_case(&[0.0, 100.0, 250.0], 1, 150.0; "second band")]
    #[test_case(&[0.0, 100.0, 250.0], 2, 0.0; "terminal has no band")]
    #[test_case(&[], 0, 0.0; "empty table")]
    fn test_extent(values: &[f32], index: usize, expected: f32) {
        assert_eq!(table_of(values).extent(index), expected);
    }

    #[test]
    fn test_set_overwrites_and_appends() {
        let mut table = table_of(&[0.0, 50.0]);
        table.set(1, 60.0);
        table.set(2, 120.0);
        assert_eq!(table.range(0).unwrap(), (0.0, 60.0));
        assert_eq!(table.terminal(), Some(120.0));
    }

    #[test]
    fn test_clear_reports_missing_again() {
        let mut table = table_of(&[0.0, 50.0]);
        table.clear();
        assert!(table.is_empty());
        assert!(table.range(0).is_err());
        assert_eq!(table.extent(0), 0.0);
    }
}
