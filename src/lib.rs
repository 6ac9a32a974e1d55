//! tablegrid - layout engine for scrollable grid/table views
//!
//! Computes positions and sizes for cells, column headers, row headers and
//! row footers in a large two-dimensional table:
//! - Monotonic cumulative offset tables per axis, O(rows + columns) to build
//! - Visible-range queries for the scrolled viewport
//! - Lazily filled attribute cache; only on-screen items get eager frames
//! - Frozen (pinned) column headers, row headers/footers and leading columns
//! - Incremental invalidation so pure scrolls never rebuild the table
//!
//! # Usage
//!
//! ```
//! use tablegrid::{LayoutConfig, Rect, TableDataSource, TableLayout};
//!
//! struct Source;
//!
//! impl TableDataSource for Source {
//!     fn number_of_rows(&self) -> usize {
//!         100
//!     }
//!     fn number_of_columns(&self) -> usize {
//!         8
//!     }
//!     fn column_width(&self, _column: usize) -> f32 {
//!         120.0
//!     }
//! }
//!
//! let mut layout = TableLayout::new(LayoutConfig::default());
//! layout.set_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
//! layout.prepare(&Source);
//!
//! let visible = layout.attributes_in_rect(layout.bounds());
//! assert!(!visible.is_empty());
//! ```

pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod invalidation;
pub mod offsets;
pub mod range;
pub mod source;

pub use config::LayoutConfig;
pub use element::{z_index, ElementId, LayoutAttributes};
pub use engine::TableLayout;
pub use error::{LayoutError, Result};
pub use geometry::{Rect, Size};
pub use invalidation::{InvalidationContext, InvalidationState};
pub use offsets::OffsetTable;
pub use source::TableDataSource;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
