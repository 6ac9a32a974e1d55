//! Mutable layout configuration and change detection.

use serde::{Deserialize, Serialize};

use crate::invalidation::InvalidationContext;

/// Default column-header band height in points.
pub const DEFAULT_COLUMN_HEADER_HEIGHT: f32 = 36.0;

/// Default row body height in points.
pub const DEFAULT_ROW_HEIGHT: f32 = 36.0;

/// Substitute size when a data source returns a non-positive column width
/// or row body height.
pub const FALLBACK_SIZE: f32 = 80.0;

/// Layout configuration for one table.
///
/// Changing any property invalidates cached geometry; use
/// [`LayoutConfig::diff`] to obtain the minimal invalidation for a change
/// instead of mutating the engine's copy directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Height of the column-header band. Non-positive omits column headers.
    pub column_header_height: f32,
    /// Default row body height, used when the data source supplies no
    /// per-row override.
    pub row_height: f32,
    /// Default row-header height. Non-positive omits the header.
    pub row_header_height: f32,
    /// Default row-footer height. Non-positive omits the footer.
    pub row_footer_height: f32,
    /// Pin column headers to the top of the viewport during vertical
    /// scrolling.
    pub frozen_column_headers: bool,
    /// Pin row headers/footers to the leading edge of the viewport during
    /// horizontal scrolling. Off by default: row supplementaries scroll
    /// with the content.
    pub frozen_row_headers: bool,
    /// Number of leading columns pinned to the viewport's leading edge.
    pub first_frozen_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_header_height: DEFAULT_COLUMN_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            row_header_height: 0.0,
            row_footer_height: 0.0,
            frozen_column_headers: true,
            frozen_row_headers: false,
            first_frozen_columns: 0,
        }
    }
}

/// Exact value-changed check without floating comparison pitfalls.
fn changed(old: f32, new: f32) -> bool {
    old.to_bits() != new.to_bits()
}

impl LayoutConfig {
    /// Describe the invalidation required to move from `self` to `new`.
    ///
    /// Size properties force a full recompute since every offset below the
    /// change moves. Freeze-state properties only reposition already-sized
    /// elements, so they produce partial contexts. An unchanged
    /// configuration produces an empty context.
    pub fn diff(&self, new: &LayoutConfig) -> InvalidationContext {
        if changed(self.column_header_height, new.column_header_height)
            || changed(self.row_height, new.row_height)
            || changed(self.row_header_height, new.row_header_height)
            || changed(self.row_footer_height, new.row_footer_height)
        {
            return InvalidationContext::everything();
        }

        let mut context = InvalidationContext::default();
        if self.frozen_column_headers != new.frozen_column_headers {
            context.header_freeze_reposition = true;
        }
        if self.frozen_row_headers != new.frozen_row_headers {
            context.row_supplementary_reposition = true;
        }
        if self.first_frozen_columns != new.first_frozen_columns {
            context.frozen_column_delta = Some(0.0);
        }
        context
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pins_column_headers_only() {
        let config = LayoutConfig::default();
        assert_eq!(config.column_header_height, DEFAULT_COLUMN_HEADER_HEIGHT);
        assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.row_header_height, 0.0);
        assert_eq!(config.row_footer_height, 0.0);
        assert!(config.frozen_column_headers);
        assert!(!config.frozen_row_headers);
        assert_eq!(config.first_frozen_columns, 0);
    }

    #[test]
    fn test_unchanged_config_is_empty_diff() {
        let config = LayoutConfig::default();
        assert!(config.diff(&config.clone()).is_empty());
    }

    #[test]
    fn test_size_change_forces_full_recompute() {
        let old = LayoutConfig::default();
        let new = LayoutConfig {
            row_height: 50.0,
            ..LayoutConfig::default()
        };
        assert!(old.diff(&new).everything);
    }

    #[test]
    fn test_freeze_flag_change_is_partial() {
        let old = LayoutConfig::default();
        let new = LayoutConfig {
            frozen_column_headers: false,
            ..LayoutConfig::default()
        };
        let context = old.diff(&new);
        assert!(!context.everything);
        assert!(context.header_freeze_reposition);
        assert!(!context.row_supplementary_reposition);
    }

    #[test]
    fn test_frozen_column_count_change_is_partial() {
        let old = LayoutConfig::default();
        let new = LayoutConfig {
            first_frozen_columns: 2,
            ..LayoutConfig::default()
        };
        let context = old.diff(&new);
        assert!(!context.everything);
        assert_eq!(context.frozen_column_delta, Some(0.0));
    }
}
