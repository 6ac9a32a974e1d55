//! Data-source collaborator contract.
//!
//! The engine pulls counts and size hints through this trait during a
//! geometry pass. Calls are synchronous; implementations must not mutate
//! the engine re-entrantly and must return consistent values for the
//! duration of one pass.

/// Supplies table dimensions and per-row/per-column size hints.
///
/// Only `number_of_rows` and `column_width` are required. The per-row
/// overrides default to `None`, which makes the engine fall back to the
/// configured default for that band (mirroring optional delegate methods
/// in the system this engine is embedded in).
pub trait TableDataSource {
    /// Total number of table rows.
    fn number_of_rows(&self) -> usize;

    /// Total number of table columns. Uniform across all rows; queried
    /// once per geometry pass.
    fn number_of_columns(&self) -> usize;

    /// Width of one column. Must be positive; a non-positive value is
    /// replaced by a fallback size and reported as a diagnostic.
    fn column_width(&self, column: usize) -> f32;

    /// Per-row body height override. `None` uses the configured default.
    /// A resolved non-positive height is replaced by a fallback size.
    fn row_height(&self, row: usize) -> Option<f32> {
        let _ = row;
        None
    }

    /// Per-row header height override. `None` uses the configured
    /// default; a resolved non-positive height omits the header.
    fn row_header_height(&self, row: usize) -> Option<f32> {
        let _ = row;
        None
    }

    /// Per-row footer height override. `None` uses the configured
    /// default; a resolved non-positive height omits the footer.
    fn row_footer_height(&self, row: usize) -> Option<f32> {
        let _ = row;
        None
    }
}
