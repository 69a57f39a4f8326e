//! Error types for index maintenance, tree construction and ingestion.
//!
//! Every variant except the ingestion ones signals a broken internal invariant;
//! none of them are retryable.

use crate::play::Characteristic;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayTreeError {
    /// An attribute partition had no plays after a build that should have filled it.
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// Partitions of one index set disagreed on how many pieces a split produces.
    #[error(
        "Split consistency error: splitting {index} by {split_on} produced {actual} pieces, expected {expected}"
    )]
    SplitConsistency {
        split_on: Characteristic,
        index: Characteristic,
        expected: usize,
        actual: usize,
    },

    #[error("Node build failed: index set holds no plays")]
    EmptyPopulation,

    #[error("Split on {0} produced no new index sets")]
    InfiniteSplitRisk(Characteristic),

    #[error("Invalid situation: {0}")]
    InvalidSituation(String),

    /// The arena has no play handle left for another play.
    #[error("Play store is full: position {position} does not fit a play id")]
    StoreFull { position: usize },

    #[error("Invalid play at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PlayTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlayTreeError::EmptyPopulation;
        assert!(err.to_string().contains("no plays"));

        let err = PlayTreeError::SplitConsistency {
            split_on: Characteristic::FieldLocation,
            index: Characteristic::Down,
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("field_location"));
        assert!(msg.contains("down_number"));
        assert!(msg.contains("expected 3"));

        let err = PlayTreeError::InvalidRecord {
            row: 7,
            reason: "down 9 out of range".to_string(),
        };
        assert!(err.to_string().contains("row 7"));

        let err = PlayTreeError::StoreFull { position: usize::MAX };
        assert!(err.to_string().contains("does not fit a play id"));
    }
}
