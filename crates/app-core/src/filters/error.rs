//! Errors for the filter engine
//!
//! Decoding never fails; only encoding typed values and submitting the
//! edit form can.

use super::keys::FilterKey;
use super::value::FilterKind;
use thiserror::Error;

/// Errors that can occur while encoding a typed value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Value does not belong to the codec's kind
    #[error("Expected a {expected:?} value, got {found:?}")]
    KindMismatch {
        /// Kind the codec handles
        expected: FilterKind,
        /// Kind of the supplied value
        found: FilterKind,
    },

    /// Value contains a separator reserved by the encoding
    #[error("Value {value:?} contains reserved separator {separator:?}")]
    ReservedSeparator {
        /// Offending value
        value: String,
        /// Reserved separator
        separator: &'static str,
    },

    /// An element that must not be empty is empty
    #[error("Empty element in {0:?} value")]
    EmptyElement(FilterKind),

    /// Number is NaN or infinite
    #[error("Number is not finite: {0}")]
    NonFiniteNumber(f64),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Structural problem with one filter row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// A filter is selected but has no value
    #[error("A value is required")]
    MissingValue,

    /// Too many metadata pairs
    #[error("Too many metadata pairs: {count} exceeds maximum {max}")]
    TooManyMetadataPairs {
        /// Actual count
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Metadata pair without `=` or with an empty side
    #[error("Metadata pair {index} must be key=value with both sides filled")]
    InvalidMetadataPair {
        /// Zero-based pair position
        index: usize,
    },

    /// Date value is not `from,to`
    #[error("Date range must be two comma-separated dates")]
    InvalidDateRange,
}

/// Validation failure of one row of the edit form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {index} ({key}): {error}")]
pub struct RowValidationError {
    /// Zero-based row position
    pub index: usize,
    /// Filter selected on the row
    pub key: FilterKey,
    /// What is wrong
    pub error: RowError,
}

/// Errors that can occur while editing or submitting the filter form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Row index past the end of the form
    #[error("Row {index} is out of range ({len} rows)")]
    RowOutOfRange {
        /// Requested index
        index: usize,
        /// Number of rows
        len: usize,
    },

    /// Row mirrors a static filter
    #[error("Row {0} mirrors a static filter and cannot be changed")]
    RowLocked(usize),

    /// One or more rows failed validation
    #[error("{} filter row(s) failed validation", .0.len())]
    Validation(Vec<RowValidationError>),
}
