//! Ledger normalization and the flat CSV snapshot.

use thiserror::Error;

pub mod normalize;
pub mod snapshot;

pub use normalize::normalize;
pub use snapshot::{read_snapshot, write_snapshot, SnapshotError, SNAPSHOT_COLUMNS};

/// A table is missing a column every downstream computation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("invalid value in column {column} at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },
}
