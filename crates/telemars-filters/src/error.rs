//! Error types for filter construction.

use chrono::NaiveDate;
use thiserror::Error;

use crate::audience::ParseError;

/// A specialized Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised when a filter value fails validation.
///
/// Every variant names the filter field it was raised for, so a caller that
/// builds several filters at once can tell which parameter was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A list was supplied but it holds no elements.
    #[error("{field}: empty list supplied")]
    EmptyCollection {
        /// The field the list was supplied for.
        field: &'static str,
    },

    /// The same element appears more than once.
    #[error("{field}: duplicate value {value} in {input}")]
    DuplicateValue {
        /// The field the list was supplied for.
        field: &'static str,
        /// The repeated element.
        value: String,
        /// The list as supplied by the caller.
        input: String,
    },

    /// An element is not a member of the field's enumeration.
    #[error("{field}: {value} is not a valid value (input: {input})")]
    InvalidMember {
        /// The field the value was supplied for.
        field: &'static str,
        /// The rejected element.
        value: String,
        /// The input as supplied by the caller.
        input: String,
    },

    /// The lower bound is not below the upper bound.
    #[error("{field}: range start {from} is not before range end {to}")]
    InvertedRange {
        /// The field the range was supplied for.
        field: &'static str,
        /// The lower bound as supplied.
        from: String,
        /// The upper bound as supplied.
        to: String,
    },

    /// The date range ends after the current date.
    #[error("date range ends in the future: {to} is after {today}")]
    FutureDate {
        /// The requested end date.
        to: NaiveDate,
        /// The current date used for validation.
        today: NaiveDate,
    },

    /// A required value was not supplied.
    #[error("{field} is required")]
    MissingRequired {
        /// The missing field.
        field: &'static str,
    },

    /// An audience label could not be parsed.
    #[error("invalid audience label: {0}")]
    Parse(#[from] ParseError),
}

impl FilterError {
    /// Creates a duplicate value error.
    pub fn duplicate(
        field: &'static str,
        value: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        FilterError::DuplicateValue {
            field,
            value: value.into(),
            input: input.into(),
        }
    }

    /// Creates an invalid member error.
    pub fn invalid_member(
        field: &'static str,
        value: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        FilterError::InvalidMember {
            field,
            value: value.into(),
            input: input.into(),
        }
    }

    /// Creates an inverted range error.
    pub fn inverted(field: &'static str, from: impl ToString, to: impl ToString) -> Self {
        FilterError::InvertedRange {
            field,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Returns the field name this error was raised for, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FilterError::EmptyCollection { field }
            | FilterError::DuplicateValue { field, .. }
            | FilterError::InvalidMember { field, .. }
            | FilterError::InvertedRange { field, .. }
            | FilterError::MissingRequired { field } => Some(field),
            FilterError::FutureDate { .. } => Some("researchDate"),
            FilterError::Parse(_) => None,
        }
    }
}
