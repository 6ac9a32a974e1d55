//! Element identity and computed layout attributes.
//!
//! Every addressable piece of the table is identified by an [`ElementId`]:
//! either an item (cell body) at a (row, column) pair, or a supplementary
//! element attached to a single axis index. The closed enum replaces the
//! original string element-kind scheme, so an unknown kind cannot be
//! constructed.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Z-index layers, back to front. Values are relative layering only: item
/// content always draws below supplementary elements so headers and footers
/// overlay scrolling cells.
pub mod z_index {
    /// Regular (scrolling) items.
    pub const ITEM: i32 = -6;
    /// Items in frozen columns, above scrolling items.
    pub const FROZEN_ITEM: i32 = -5;
    /// Row footers.
    pub const ROW_FOOTER: i32 = -4;
    /// Row headers.
    pub const ROW_HEADER: i32 = -3;
    /// Column headers.
    pub const COLUMN_HEADER: i32 = -2;
    /// Column headers of frozen columns, above scrolling column headers.
    pub const FROZEN_COLUMN_HEADER: i32 = -1;
}

/// Identity of one addressable element in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    /// A cell body at (row, column).
    Item {
        /// Table row index.
        row: usize,
        /// Table column index.
        column: usize,
    },
    /// The header band above one column.
    ColumnHeader {
        /// Table column index.
        column: usize,
    },
    /// The header band above one row's cells.
    RowHeader {
        /// Table row index.
        row: usize,
    },
    /// The footer band below one row's cells.
    RowFooter {
        /// Table row index.
        row: usize,
    },
}

/// Computed geometry for one element.
///
/// Attributes are immutable value records: repositioning produces a new
/// record replacing the cached one, never an in-place frame mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    /// Which element this geometry belongs to.
    pub element: ElementId,
    /// Frame in content coordinates.
    pub frame: Rect,
    /// Drawing layer (lower draws first).
    pub z_index: i32,
}

impl LayoutAttributes {
    /// Create attributes for an element.
    pub fn new(element: ElementId, frame: Rect, z_index: i32) -> Self {
        Self {
            element,
            frame,
            z_index,
        }
    }

    /// Copy of these attributes with the frame moved to a new origin.
    pub fn repositioned(&self, x: f32, y: f32) -> Self {
        Self {
            element: self.element,
            frame: self.frame.with_origin(x, y),
            z_index: self.z_index,
        }
    }
}
