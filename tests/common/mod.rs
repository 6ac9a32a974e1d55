//! Common test utilities: configurable data-source fixtures.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tablegrid::TableDataSource;

/// Data source with uniform sizes and optional per-row overrides.
pub struct FixtureSource {
    pub rows: usize,
    pub columns: usize,
    pub column_width: f32,
    /// Per-column widths; falls back to `column_width` when shorter.
    pub column_widths: Vec<f32>,
    pub row_height: Option<f32>,
    pub row_header_height: Option<f32>,
    pub row_footer_height: Option<f32>,
}

impl FixtureSource {
    /// Uniform grid with no per-row overrides.
    pub fn grid(rows: usize, columns: usize, column_width: f32) -> Self {
        Self {
            rows,
            columns,
            column_width,
            column_widths: Vec::new(),
            row_height: None,
            row_header_height: None,
            row_footer_height: None,
        }
    }

    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = Some(height);
        self
    }

    pub fn with_row_header_height(mut self, height: f32) -> Self {
        self.row_header_height = Some(height);
        self
    }

    pub fn with_row_footer_height(mut self, height: f32) -> Self {
        self.row_footer_height = Some(height);
        self
    }
}

impl TableDataSource for FixtureSource {
    fn number_of_rows(&self) -> usize {
        self.rows
    }

    fn number_of_columns(&self) -> usize {
        self.columns
    }

    fn column_width(&self, column: usize) -> f32 {
        self.column_widths
            .get(column)
            .copied()
            .unwrap_or(self.column_width)
    }

    fn row_height(&self, _row: usize) -> Option<f32> {
        self.row_height
    }

    fn row_header_height(&self, _row: usize) -> Option<f32> {
        self.row_header_height
    }

    fn row_footer_height(&self, _row: usize) -> Option<f32> {
        self.row_footer_height
    }
}
