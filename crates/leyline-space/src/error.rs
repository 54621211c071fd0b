//! Error types for space construction.

use std::fmt;

/// Errors arising from constructing a space with invalid parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// A discrete cardinality bound admits no values.
    NonPositiveCardinality {
        /// The offending bound.
        value: i64,
    },
    /// Box bounds do not form an interval (inverted or NaN).
    InvalidBounds {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// A dict space was given the same label twice.
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCardinality { value } => {
                write!(f, "cardinality bound {value} admits no values")
            }
            Self::InvalidBounds { low, high } => {
                write!(f, "bounds [{low}, {high}] do not form an interval")
            }
            Self::DuplicateLabel { label } => {
                write!(f, "duplicate label '{label}'")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
