//! Structured error types for tablegrid.

/// All errors that can occur during layout computation.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// An offset-table entry was queried before any geometry pass populated
    /// it. Not fatal: the caller must run `prepare` and retry.
    #[error("geometry not computed for {axis} index {index}")]
    MissingGeometry {
        /// Which axis the missing entry belongs to ("row" or "column").
        axis: &'static str,
        /// The index that was queried.
        index: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
