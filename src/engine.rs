//! The table layout engine.
//!
//! [`TableLayout`] computes positions and sizes for cells, column headers,
//! row headers and row footers in a two-dimensional table, and keeps that
//! geometry incrementally up to date as the viewport scrolls. Layout is
//! axis-separable: a full pass walks rows top-to-bottom and columns
//! left-to-right once, filling cumulative offset tables, and only the items
//! inside the viewport get eagerly cached frames. Scroll and configuration
//! changes feed the invalidation state machine so each frame recomputes the
//! minimum necessary geometry.
//!
//! The engine is single-threaded by design: one instance per table view,
//! driven in strict invalidate → prepare → query phases by its container.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::{LayoutConfig, FALLBACK_SIZE};
use crate::element::{z_index, ElementId, LayoutAttributes};
use crate::error::{LayoutError, Result};
use crate::geometry::{Rect, Size};
use crate::invalidation::{InvalidationContext, InvalidationState, PartialInvalidation};
use crate::offsets::OffsetTable;
use crate::range::intersecting_range;
use crate::source::TableDataSource;

/// Exact value-changed check without floating comparison pitfalls.
fn moved(old: f32, new: f32) -> bool {
    old.to_bits() != new.to_bits()
}

/// Layout engine for one scrollable table view.
pub struct TableLayout {
    config: LayoutConfig,
    /// Viewport in content coordinates: origin is the scroll offset.
    bounds: Rect,
    number_of_rows: usize,
    number_of_columns: usize,
    /// Header-band start Y per row; terminal entry is total content height.
    row_header_offsets: OffsetTable,
    /// Body-band start Y per row; terminal entry is total content height.
    row_body_offsets: OffsetTable,
    /// Footer-band start Y per row; terminal entry is total content height.
    row_footer_offsets: OffsetTable,
    /// Left edge X per column; terminal entry is total content width.
    column_offsets: OffsetTable,
    column_header_attributes: HashMap<usize, LayoutAttributes>,
    row_header_attributes: HashMap<usize, LayoutAttributes>,
    row_footer_attributes: HashMap<usize, LayoutAttributes>,
    /// Lazily populated; most items of a large table are never queried.
    item_attributes: HashMap<(usize, usize), LayoutAttributes>,
    state: InvalidationState,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl TableLayout {
    /// Create an engine with the given configuration. The first `prepare`
    /// call runs a full geometry pass.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            bounds: Rect::default(),
            number_of_rows: 0,
            number_of_columns: 0,
            row_header_offsets: OffsetTable::new("row"),
            row_body_offsets: OffsetTable::new("row"),
            row_footer_offsets: OffsetTable::new("row"),
            column_offsets: OffsetTable::new("column"),
            column_header_attributes: HashMap::new(),
            row_header_attributes: HashMap::new(),
            row_footer_attributes: HashMap::new(),
            item_attributes: HashMap::new(),
            state: InvalidationState::FullRecompute,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current viewport bounds (origin is the scroll offset).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of table rows resolved by the last geometry pass.
    pub fn number_of_rows(&self) -> usize {
        self.number_of_rows
    }

    /// Number of table columns resolved by the last geometry pass.
    pub fn number_of_columns(&self) -> usize {
        self.number_of_columns
    }

    // ------------------------------------------------------------------
    // Invalidation surface
    // ------------------------------------------------------------------

    /// Replace the configuration, queueing the minimal invalidation for
    /// the change. Returns the applied context (empty if nothing changed).
    pub fn set_configuration(&mut self, new: LayoutConfig) -> InvalidationContext {
        let context = self.config.diff(&new);
        self.config = new;
        self.state.absorb(context.clone());
        context
    }

    /// True only if `new` differs from the current bounds in size or
    /// origin.
    pub fn should_invalidate_for_bounds_change(&self, new: Rect) -> bool {
        moved(self.bounds.x, new.x)
            || moved(self.bounds.y, new.y)
            || moved(self.bounds.width, new.width)
            || moved(self.bounds.height, new.height)
    }

    /// Describe the invalidation a bounds change would require, without
    /// applying it.
    ///
    /// A size change invalidates everything: the hot ranges and pinned
    /// positions all depend on the viewport size. An origin-only change
    /// (pure scroll) repositions only the pinned elements that track the
    /// moved axis.
    pub fn context_for_bounds_change(&self, new: Rect) -> InvalidationContext {
        let old = self.bounds;
        if moved(old.width, new.width) || moved(old.height, new.height) {
            return InvalidationContext::everything();
        }

        let vertical = moved(old.y, new.y);
        let horizontal = moved(old.x, new.x);
        if !vertical && !horizontal {
            return InvalidationContext::default();
        }

        let mut context = InvalidationContext::default();
        if (self.config.frozen_column_headers && vertical) || new.y < 0.0 {
            context.header_freeze_reposition = true;
        }
        let past_trailing_edge = horizontal && new.max_x() > self.content_size().width;
        if (horizontal && self.config.frozen_row_headers && self.has_row_supplementaries())
            || new.x < 0.0
            || past_trailing_edge
        {
            context.row_supplementary_reposition = true;
        }
        if self.config.first_frozen_columns > 0 && horizontal {
            context.frozen_column_delta = Some(new.x - old.x);
        }
        context
    }

    /// Move the viewport, queueing the minimal invalidation. Returns the
    /// applied context.
    pub fn set_bounds(&mut self, new: Rect) -> InvalidationContext {
        let context = self.context_for_bounds_change(new);
        self.bounds = new;
        self.state.absorb(context.clone());
        context
    }

    /// Queue an explicit invalidation request.
    pub fn invalidate(&mut self, context: InvalidationContext) {
        self.state.absorb(context);
    }

    /// Queue a full recompute.
    pub fn invalidate_all(&mut self) {
        self.state.absorb(InvalidationContext::everything());
    }

    /// Drop only the listed item entries from the cache (surgical
    /// data-change invalidation).
    pub fn invalidate_items(&mut self, items: Vec<ElementId>) {
        self.state.absorb(InvalidationContext::dropping_items(items));
    }

    /// Consume pending invalidation, recomputing exactly the stale subset.
    /// Must be called before geometry queries after any invalidation.
    pub fn prepare(&mut self, source: &dyn TableDataSource) {
        match self.state.take() {
            InvalidationState::Clean => {}
            InvalidationState::FullRecompute => self.full_pass(source),
            InvalidationState::Partial(partial) => self.apply_partial(&partial),
        }
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    /// Total content size: terminal column offset × terminal row-footer
    /// offset. Zero before the first geometry pass.
    pub fn content_size(&self) -> Size {
        Size::new(
            self.column_offsets.terminal().unwrap_or(0.0),
            self.row_footer_offsets.terminal().unwrap_or(0.0),
        )
    }

    /// Cached attributes for any element; `None` if absent.
    ///
    /// Supplementary elements are only ever populated by a geometry or
    /// reposition pass; items may additionally be filled lazily through
    /// [`TableLayout::attributes_for_item`].
    pub fn attributes_for(&self, element: ElementId) -> Option<LayoutAttributes> {
        match element {
            ElementId::Item { row, column } => self.item_attributes.get(&(row, column)).copied(),
            ElementId::ColumnHeader { column } => {
                self.column_header_attributes.get(&column).copied()
            }
            ElementId::RowHeader { row } => self.row_header_attributes.get(&row).copied(),
            ElementId::RowFooter { row } => self.row_footer_attributes.get(&row).copied(),
        }
    }

    /// Attributes for one item, computing and caching them from the offset
    /// tables when absent.
    ///
    /// Fails with `MissingGeometry` if the index lies outside the table or
    /// no pass has populated the tables for it; the caller must `prepare`
    /// first.
    pub fn attributes_for_item(&mut self, row: usize, column: usize) -> Result<LayoutAttributes> {
        // The terminal offset entries sit at index N, so an index equal to
        // the count would otherwise resolve to a zero-height phantom band.
        if row >= self.number_of_rows {
            return Err(LayoutError::MissingGeometry {
                axis: "row",
                index: row,
            });
        }
        if column >= self.number_of_columns {
            return Err(LayoutError::MissingGeometry {
                axis: "column",
                index: column,
            });
        }
        if let Some(attributes) = self.item_attributes.get(&(row, column)) {
            return Ok(*attributes);
        }
        let (x0, x1) = self.column_offsets.range(column)?;
        let y0 = self.missing_row(self.row_body_offsets.get(row), row)?;
        let y1 = self.missing_row(self.row_footer_offsets.get(row), row)?;
        let attributes = self.item_attributes_at(row, column, x0, x1 - x0, y0, y1 - y0);
        self.item_attributes.insert((row, column), attributes);
        Ok(attributes)
    }

    /// All elements whose frames intersect `rect`, sorted back to front
    /// (ascending z-order, then row, then column).
    ///
    /// Items inside the rectangle that were never cached are computed
    /// lazily. Empty before the first geometry pass.
    pub fn attributes_in_rect(&mut self, rect: Rect) -> Vec<LayoutAttributes> {
        let visible_columns = {
            let table = &self.column_offsets;
            intersecting_range(self.number_of_columns, (rect.x, rect.max_x()), |column| {
                table.range(column).ok()
            })
        };
        // A row's envelope spans header start to footer end, so a partially
        // visible header or footer pulls the whole row in.
        let visible_rows = {
            let table = &self.row_header_offsets;
            intersecting_range(self.number_of_rows, (rect.y, rect.max_y()), |row| {
                table.range(row).ok()
            })
        };

        // Frozen columns are pinned inside the viewport regardless of the
        // scrolled-away content under them.
        let frozen_count = self.config.first_frozen_columns.min(self.number_of_columns);
        let mut columns: Vec<usize> = (0..frozen_count).collect();
        if let Some(range) = visible_columns {
            columns.extend(range.filter(|column| *column >= frozen_count));
        }

        let mut attributes = Vec::new();
        for &column in &columns {
            if let Some(header) = self.column_header_attributes.get(&column) {
                if header.frame.intersects(&rect) {
                    attributes.push(*header);
                }
            }
        }

        if let Some(rows) = visible_rows {
            for row in rows {
                if let Some(header) = self.row_header_attributes.get(&row) {
                    if header.frame.intersects(&rect) {
                        attributes.push(*header);
                    }
                }
                if let Some(footer) = self.row_footer_attributes.get(&row) {
                    if footer.frame.intersects(&rect) {
                        attributes.push(*footer);
                    }
                }
                for &column in &columns {
                    if let Ok(item) = self.attributes_for_item(row, column) {
                        if item.frame.intersects(&rect) {
                            attributes.push(item);
                        }
                    }
                }
            }
        }

        attributes.sort_by_key(sort_key);
        attributes
    }

    /// Width of one column; 0 until a pass has populated the tables.
    pub fn column_width(&self, column: usize) -> f32 {
        self.column_offsets.extent(column)
    }

    /// Body height of one row; 0 until populated.
    pub fn row_height(&self, row: usize) -> f32 {
        self.band_height(&self.row_body_offsets, &self.row_footer_offsets, row, 0)
    }

    /// Header height of one row; 0 until populated or when omitted.
    pub fn row_header_height(&self, row: usize) -> f32 {
        self.band_height(&self.row_header_offsets, &self.row_body_offsets, row, 0)
    }

    /// Footer height of one row; 0 until populated or when omitted.
    pub fn row_footer_height(&self, row: usize) -> f32 {
        self.band_height(&self.row_footer_offsets, &self.row_header_offsets, row, 1)
    }

    // ------------------------------------------------------------------
    // Geometry passes
    // ------------------------------------------------------------------

    /// Full geometry pass: one walk per axis, O(rows + columns).
    ///
    /// Only rows/columns intersecting the viewport get eagerly cached item
    /// frames; everything else is filled lazily on demand, keeping memory
    /// bounded while scrolling through large tables.
    fn full_pass(&mut self, source: &dyn TableDataSource) {
        self.clear_cached_geometry();
        self.number_of_rows = source.number_of_rows();
        self.number_of_columns = source.number_of_columns();
        self.row_header_offsets.reserve(self.number_of_rows);
        self.row_body_offsets.reserve(self.number_of_rows);
        self.row_footer_offsets.reserve(self.number_of_rows);
        self.column_offsets.reserve(self.number_of_columns);

        let viewport = self.bounds;

        // Vertical walk: three bands per row, packed with no gaps below the
        // column-header band.
        let mut y = self.config.column_header_height.max(0.0);
        let mut hot_rows: Option<(usize, usize)> = None;
        for row in 0..self.number_of_rows {
            let row_start = y;

            self.row_header_offsets.push(y);
            y += self
                .resolve_band(source.row_header_height(row), self.config.row_header_height);

            self.row_body_offsets.push(y);
            y += self.resolve_row_body(source.row_height(row), row);

            self.row_footer_offsets.push(y);
            y += self
                .resolve_band(source.row_footer_height(row), self.config.row_footer_height);

            if row_start < viewport.max_y() && y > viewport.y {
                hot_rows = match hot_rows {
                    Some((first, _)) => Some((first, row)),
                    None => Some((row, row)),
                };
            }
        }
        self.row_header_offsets.push(y);
        self.row_body_offsets.push(y);
        self.row_footer_offsets.push(y);

        // Horizontal walk: column offsets, column headers, and eager item
        // frames for the hot window.
        let header_height = self.config.column_header_height;
        let mut x = 0.0_f32;
        for column in 0..self.number_of_columns {
            let width = self.resolve_column_width(source.column_width(column), column);
            self.column_offsets.push(x);

            if header_height > 0.0 {
                let header = self.column_header_attributes_at(column, x, width);
                self.column_header_attributes.insert(column, header);
            }

            let frozen = column < self.config.first_frozen_columns;
            let on_screen = x < viewport.max_x() && x + width > viewport.x;
            if let Some((first, last)) = hot_rows {
                if on_screen || frozen {
                    for row in first..=last {
                        let y0 = self.row_body_offsets.get(row).unwrap_or(0.0);
                        let y1 = self.row_footer_offsets.get(row).unwrap_or(y0);
                        let item = self.item_attributes_at(row, column, x, width, y0, y1 - y0);
                        self.item_attributes.insert((row, column), item);
                    }
                }
            }

            x += width;
        }
        self.column_offsets.push(x);

        // Row supplementaries need the final content width for the
        // trailing-edge clamp, so they are built after both walks.
        self.rebuild_row_supplementaries();

        debug_assert!(
            source.number_of_rows() == self.number_of_rows
                && source.number_of_columns() == self.number_of_columns,
            "data source counts changed mid-pass"
        );
        let content = self.content_size();
        debug!(
            rows = self.number_of_rows,
            columns = self.number_of_columns,
            width = content.width,
            height = content.height,
            "table geometry computed"
        );
    }

    /// Apply accumulated partial work, leaving untouched cache entries
    /// exactly as the last full pass produced them.
    fn apply_partial(&mut self, partial: &PartialInvalidation) {
        for element in &partial.dropped_items {
            if let ElementId::Item { row, column } = element {
                self.item_attributes.remove(&(*row, *column));
            }
        }
        if partial.header_freeze_reposition || partial.frozen_column_delta.is_some() {
            self.reposition_column_headers();
        }
        if partial.row_supplementary_reposition {
            self.rebuild_row_supplementaries();
        }
        if partial.frozen_column_delta.is_some() {
            self.reposition_frozen_column_items();
        }
    }

    /// Rebuild row header/footer attributes against the current scroll
    /// position. Heights come from the offset tables; only X moves.
    fn rebuild_row_supplementaries(&mut self) {
        self.row_header_attributes.clear();
        self.row_footer_attributes.clear();
        let x = self.row_supplementary_x();
        let width = self.bounds.width;
        for row in 0..self.number_of_rows {
            let header_height = self.row_header_height(row);
            if header_height > 0.0 {
                if let Some(y) = self.row_header_offsets.get(row) {
                    self.row_header_attributes.insert(
                        row,
                        LayoutAttributes::new(
                            ElementId::RowHeader { row },
                            Rect::new(x, y, width, header_height),
                            z_index::ROW_HEADER,
                        ),
                    );
                }
            }
            let footer_height = self.row_footer_height(row);
            if footer_height > 0.0 {
                if let Some(y) = self.row_footer_offsets.get(row) {
                    self.row_footer_attributes.insert(
                        row,
                        LayoutAttributes::new(
                            ElementId::RowFooter { row },
                            Rect::new(x, y, width, footer_height),
                            z_index::ROW_FOOTER,
                        ),
                    );
                }
            }
        }
    }

    /// Replace every cached column-header record with one positioned for
    /// the current freeze state, scroll origin and frozen-column shift.
    fn reposition_column_headers(&mut self) {
        let columns: Vec<usize> = self.column_header_attributes.keys().copied().collect();
        for column in columns {
            if let Ok((x0, x1)) = self.column_offsets.range(column) {
                let header = self.column_header_attributes_at(column, x0, x1 - x0);
                self.column_header_attributes.insert(column, header);
            }
        }
    }

    /// Re-pin cached items of frozen (or formerly frozen) columns. Entries
    /// in scrolling columns are left untouched.
    fn reposition_frozen_column_items(&mut self) {
        let first_frozen = self.config.first_frozen_columns;
        let shift = self.frozen_column_shift();
        let stale: Vec<((usize, usize), LayoutAttributes)> = self
            .item_attributes
            .iter()
            .filter(|(key, attributes)| {
                key.1 < first_frozen || attributes.z_index == z_index::FROZEN_ITEM
            })
            .map(|(key, attributes)| (*key, *attributes))
            .collect();
        for ((row, column), attributes) in stale {
            if let Ok((x0, _)) = self.column_offsets.range(column) {
                let frozen = column < first_frozen;
                let x = if frozen { x0 + shift } else { x0 };
                let z = if frozen {
                    z_index::FROZEN_ITEM
                } else {
                    z_index::ITEM
                };
                self.item_attributes.insert(
                    (row, column),
                    LayoutAttributes::new(
                        attributes.element,
                        attributes.frame.with_origin(x, attributes.frame.y),
                        z,
                    ),
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Attribute construction
    // ------------------------------------------------------------------

    fn item_attributes_at(
        &self,
        row: usize,
        column: usize,
        x: f32,
        width: f32,
        y: f32,
        height: f32,
    ) -> LayoutAttributes {
        let frozen = column < self.config.first_frozen_columns;
        let shift = if frozen { self.frozen_column_shift() } else { 0.0 };
        let z = if frozen {
            z_index::FROZEN_ITEM
        } else {
            z_index::ITEM
        };
        LayoutAttributes::new(
            ElementId::Item { row, column },
            Rect::new(x + shift, y, width, height),
            z,
        )
    }

    fn column_header_attributes_at(&self, column: usize, x: f32, width: f32) -> LayoutAttributes {
        let frozen = column < self.config.first_frozen_columns;
        let shift = if frozen { self.frozen_column_shift() } else { 0.0 };
        let z = if frozen {
            z_index::FROZEN_COLUMN_HEADER
        } else {
            z_index::COLUMN_HEADER
        };
        LayoutAttributes::new(
            ElementId::ColumnHeader { column },
            Rect::new(
                x + shift,
                self.column_header_y(),
                width,
                self.config.column_header_height,
            ),
            z,
        )
    }

    // ------------------------------------------------------------------
    // Position helpers
    // ------------------------------------------------------------------

    /// Frozen headers pin to the viewport top but never above the content
    /// top during over-scroll bounce. Unfrozen headers scroll with content.
    fn column_header_y(&self) -> f32 {
        if self.config.frozen_column_headers {
            self.bounds.y.max(0.0)
        } else {
            0.0
        }
    }

    /// Pinned columns shift right by the scrolled distance so they hold
    /// their on-screen position; no shift at or before the origin.
    fn frozen_column_shift(&self) -> f32 {
        self.bounds.x.max(0.0)
    }

    /// Row supplementaries span the viewport width. When pinned they track
    /// the horizontal origin, clamped so bounce at either edge leaves them
    /// flush with the content.
    fn row_supplementary_x(&self) -> f32 {
        if !self.config.frozen_row_headers {
            return 0.0;
        }
        let max_x = (self.content_size().width - self.bounds.width).max(0.0);
        self.bounds.x.clamp(0.0, max_x)
    }

    fn has_row_supplementaries(&self) -> bool {
        self.config.row_header_height > 0.0
            || self.config.row_footer_height > 0.0
            || !self.row_header_attributes.is_empty()
            || !self.row_footer_attributes.is_empty()
    }

    // ------------------------------------------------------------------
    // Size-hint resolution
    // ------------------------------------------------------------------

    /// Header/footer band: any non-negative height is allowed, zero (or a
    /// negative hint) omits the band.
    fn resolve_band(&self, hint: Option<f32>, default: f32) -> f32 {
        hint.unwrap_or(default).max(0.0)
    }

    /// Row body height must be positive; recover with the fallback size
    /// rather than aborting the pass.
    fn resolve_row_body(&self, hint: Option<f32>, row: usize) -> f32 {
        let height = hint.unwrap_or(self.config.row_height);
        if height > 0.0 {
            height
        } else {
            warn!(row, height, "non-positive row height, using fallback size");
            FALLBACK_SIZE
        }
    }

    /// Column width must be positive; recover with the fallback size.
    fn resolve_column_width(&self, width: f32, column: usize) -> f32 {
        if width > 0.0 {
            width
        } else {
            warn!(column, width, "non-positive column width, using fallback size");
            FALLBACK_SIZE
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn band_height(
        &self,
        start: &OffsetTable,
        end: &OffsetTable,
        row: usize,
        end_offset: usize,
    ) -> f32 {
        match (start.get(row), end.get(row + end_offset)) {
            (Some(min), Some(max)) => (max - min).max(0.0),
            _ => 0.0,
        }
    }

    fn missing_row(&self, value: Option<f32>, row: usize) -> Result<f32> {
        value.ok_or(LayoutError::MissingGeometry {
            axis: "row",
            index: row,
        })
    }

    fn clear_cached_geometry(&mut self) {
        self.column_header_attributes.clear();
        self.row_header_attributes.clear();
        self.row_footer_attributes.clear();
        self.item_attributes.clear();
        self.row_header_offsets.clear();
        self.row_body_offsets.clear();
        self.row_footer_offsets.clear();
        self.column_offsets.clear();
    }
}

/// Stable back-to-front ordering: z-order first, then row, then column.
fn sort_key(attributes: &LayoutAttributes) -> (i32, usize, usize) {
    match attributes.element {
        ElementId::Item { row, column } => (attributes.z_index, row, column),
        ElementId::ColumnHeader { column } => (attributes.z_index, 0, column),
        ElementId::RowHeader { row } | ElementId::RowFooter { row } => (attributes.z_index, row, 0),
    }
}
