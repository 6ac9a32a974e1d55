//! Invalidation contexts and the engine's dirty-state machine.
//!
//! Most scroll events only shift already-sized pinned elements, so the
//! engine narrows recomputation with a small state machine instead of
//! rebuilding the whole table per frame. A transient
//! [`InvalidationContext`] describes the reason for one invalidation
//! request; the engine absorbs contexts into an [`InvalidationState`] and
//! consumes the accumulated state on the next prepare.

use crate::element::ElementId;

/// Transient descriptor of what one invalidation request affects.
///
/// Created per request, consumed once by the engine, then discarded. An
/// empty (default) context means nothing needs to change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidationContext {
    /// Recompute the whole table: offset tables, caches, content size.
    pub everything: bool,
    /// Reposition frozen column headers against the new vertical origin.
    pub header_freeze_reposition: bool,
    /// Reposition row headers/footers against the new horizontal origin.
    pub row_supplementary_reposition: bool,
    /// Recompute the frozen columns' pinned X offset. Carries the signed
    /// horizontal origin delta that triggered the adjustment.
    pub frozen_column_delta: Option<f32>,
    /// Item identities to drop from the attribute cache.
    pub dropped_items: Vec<ElementId>,
}

impl InvalidationContext {
    /// Context requesting a full recompute.
    pub fn everything() -> Self {
        Self {
            everything: true,
            ..Self::default()
        }
    }

    /// Context dropping only the listed item entries (surgical data-change
    /// invalidation). Non-item identities are ignored by the engine.
    pub fn dropping_items(items: Vec<ElementId>) -> Self {
        Self {
            dropped_items: items,
            ..Self::default()
        }
    }

    /// True if this context requests no work at all.
    pub fn is_empty(&self) -> bool {
        !self.everything
            && !self.header_freeze_reposition
            && !self.row_supplementary_reposition
            && self.frozen_column_delta.is_none()
            && self.dropped_items.is_empty()
    }
}

/// Pending partial work accumulated between layout passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialInvalidation {
    /// Frozen column headers must be repositioned.
    pub header_freeze_reposition: bool,
    /// Row headers/footers must be repositioned horizontally.
    pub row_supplementary_reposition: bool,
    /// Frozen columns' pinned X offset must be recomputed. The value is
    /// the accumulated origin delta since the last pass.
    pub frozen_column_delta: Option<f32>,
    /// Item entries to evict from the cache.
    pub dropped_items: Vec<ElementId>,
}

/// What the engine must recompute before serving the next geometry query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InvalidationState {
    /// All cached geometry is valid.
    #[default]
    Clean,
    /// Everything must be rebuilt from the data source.
    FullRecompute,
    /// Only the listed subset is stale.
    Partial(PartialInvalidation),
}

impl InvalidationState {
    /// Merge one invalidation request into the pending state.
    ///
    /// A full recompute subsumes any partial work; partial requests
    /// accumulate until consumed.
    pub fn absorb(&mut self, context: InvalidationContext) {
        if context.is_empty() {
            return;
        }
        if context.everything || matches!(self, Self::FullRecompute) {
            *self = Self::FullRecompute;
            return;
        }

        let partial = match self {
            Self::Partial(partial) => partial,
            _ => {
                *self = Self::Partial(PartialInvalidation::default());
                match self {
                    Self::Partial(partial) => partial,
                    // Just assigned above.
                    _ => return,
                }
            }
        };

        partial.header_freeze_reposition |= context.header_freeze_reposition;
        partial.row_supplementary_reposition |= context.row_supplementary_reposition;
        if let Some(delta) = context.frozen_column_delta {
            let accumulated = partial.frozen_column_delta.unwrap_or(0.0);
            partial.frozen_column_delta = Some(accumulated + delta);
        }
        partial.dropped_items.extend(context.dropped_items);
    }

    /// Consume the pending state, resetting to `Clean`.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// True if no work is pending.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_is_ignored() {
        let mut state = InvalidationState::Clean;
        state.absorb(InvalidationContext::default());
        assert!(state.is_clean());
    }

    #[test]
    fn test_everything_subsumes_partial() {
        let mut state = InvalidationState::Clean;
        state.absorb(InvalidationContext {
            header_freeze_reposition: true,
            ..InvalidationContext::default()
        });
        assert!(matches!(state, InvalidationState::Partial(_)));

        state.absorb(InvalidationContext::everything());
        assert_eq!(state, InvalidationState::FullRecompute);

        // Later partial requests cannot downgrade a pending full recompute
        state.absorb(InvalidationContext {
            row_supplementary_reposition: true,
            ..InvalidationContext::default()
        });
        assert_eq!(state, InvalidationState::FullRecompute);
    }

    #[test]
    fn test_partial_requests_accumulate() {
        let mut state = InvalidationState::Clean;
        state.absorb(InvalidationContext {
            frozen_column_delta: Some(30.0),
            ..InvalidationContext::default()
        });
        state.absorb(InvalidationContext {
            frozen_column_delta: Some(-10.0),
            row_supplementary_reposition: true,
            ..InvalidationContext::default()
        });

        match state {
            InvalidationState::Partial(partial) => {
                assert_eq!(partial.frozen_column_delta, Some(20.0));
                assert!(partial.row_supplementary_reposition);
                assert!(!partial.header_freeze_reposition);
            }
            other => panic!("expected partial state, got {other:?}"),
        }
    }

    #[test]
    fn test_take_resets_to_clean() {
        let mut state = InvalidationState::FullRecompute;
        assert_eq!(state.take(), InvalidationState::FullRecompute);
        assert!(state.is_clean());
    }

    #[test]
    fn test_dropped_items_accumulate() {
        let mut state = InvalidationState::Clean;
        state.absorb(InvalidationContext::dropping_items(vec![ElementId::Item {
            row: 0,
            column: 1,
        }]));
        state.absorb(InvalidationContext::dropping_items(vec![ElementId::Item {
            row: 2,
            column: 3,
        }]));

        match state {
            InvalidationState::Partial(partial) => {
                assert_eq!(partial.dropped_items.len(), 2);
            }
            other => panic!("expected partial state, got {other:?}"),
        }
    }
}
