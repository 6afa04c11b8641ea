//! Audience labels.
//!
//! A label is the compact, human-readable name of a target audience:
//!
//! ```text
//! W 25-50 IL 1-3,6 AB KIDS AGE 2-6
//! │ │     │        │  └ children: age bins, or the children count
//! │ │     │        └ income groups, in the order given
//! │ │     └ income levels, runs of three or more as ranges
//! │ └ age: min-max, or min+ when open-ended
//! └ anchor: M, W or All
//! ```
//!
//! [`encode`] writes a label for a [`DemographicFilter`] and [`parse`] reads
//! the anchor, age and income terms back. Children terms are written but not
//! read.
//!
//! # Example
//!
//! ```
//! use telemars_filters::audience;
//!
//! let filter = audience::parse("All 18+ IL 4,3,1,2,6")?;
//! assert_eq!(audience::encode(&filter).as_deref(), Some("All 18+ IL 1-4,6"));
//! # Ok::<(), telemars_filters::FilterError>(())
//! ```

mod error;
mod label;
mod lexer;
mod parser;

pub use error::ParseError;
pub use label::{encode, ALL_ANCHOR, INCOME_LEVEL_PREFIX, KIDS_AGE_PREFIX, NO_KIDS};
pub use lexer::{LabelToken, Lexer, PositionedToken};
pub use parser::AudienceParser;

use crate::error::FilterResult;
use crate::filters::DemographicFilter;

/// Parses an audience label.
///
/// # Errors
///
/// See [`AudienceParser::parse`].
pub fn parse(label: &str) -> FilterResult<DemographicFilter> {
    AudienceParser::parse(label)
}

#[cfg(test)]
mod tests;
