//! Typed error surface for the analytics engine.

use thiserror::Error;

/// Errors surfaced by dataset loading and engine operations.
///
/// Recoverable conditions (unparseable numeric cells, missing cuisine text,
/// predicting before the first training run) never reach this enum; they
/// degrade to documented defaults inside the engine instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Dataset file missing or unreadable. No engine is constructed.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV stream could not be read at all (individual bad lines are
    /// skipped during loading and never produce this).
    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    /// `recommend` was asked about a name absent from the table. Distinct
    /// from a successful query with zero similar rows.
    #[error("restaurant not found: {0:?}")]
    RestaurantNotFound(String),

    /// Too few usable rows for a non-degenerate train/test split, or the
    /// held-out targets carry no variance so the fit score is meaningless.
    #[error("insufficient data to train a rating model ({rows} rows)")]
    InsufficientData { rows: usize },

    /// The similarity matrix and the table disagree on row count.
    #[error("similarity index covers {matrix} rows but the table has {table}")]
    IndexOutOfSync { matrix: usize, table: usize },
}
