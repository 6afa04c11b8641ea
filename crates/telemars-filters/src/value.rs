//! Validated filter values.
//!
//! Each type here checks its input once, at construction, and is immutable
//! afterwards. A constructor either returns a fully valid value or a
//! [`FilterError`]; nothing is clamped or silently dropped.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::{FilterError, FilterResult};
use crate::expr::{self, Expression};
use crate::params::ApiEnum;

/// Date format used by the query service.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper age bound that stands for "and older" in audience labels.
pub const OPEN_AGE_MAX: u32 = 99;

/// Renders a caller's list the way it appears in error messages.
fn echo<V: fmt::Display>(values: &[V]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Checks the non-empty and all-distinct invariants shared by every set.
fn check_distinct<V: PartialEq + fmt::Display>(
    field: &'static str,
    values: &[V],
) -> FilterResult<()> {
    if values.is_empty() {
        return Err(FilterError::EmptyCollection { field });
    }
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(FilterError::duplicate(field, value.to_string(), echo(values)));
        }
    }
    Ok(())
}

// ==================== EnumSet ====================

/// A non-empty list of distinct enumeration members bound to a field.
///
/// Members keep the order the caller supplied them in; the rendered
/// expression lists codes in that same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSet<T> {
    field: &'static str,
    values: Vec<T>,
}

impl<T: ApiEnum + fmt::Display> EnumSet<T> {
    /// Validates `values` for `field`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` for an empty list and
    /// `FilterError::DuplicateValue` when a member repeats.
    pub fn new(field: &'static str, values: impl IntoIterator<Item = T>) -> FilterResult<Self> {
        let values: Vec<T> = values.into_iter().collect();
        check_distinct(field, &values)?;
        Ok(Self { field, values })
    }

    /// Builds a set from raw numeric codes.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidMember` for a code outside the
    /// enumeration, plus the errors of [`EnumSet::new`].
    pub fn from_codes(field: &'static str, raw: &[i64]) -> FilterResult<Self> {
        let values = raw
            .iter()
            .map(|&code| {
                T::from_code(code)
                    .ok_or_else(|| FilterError::invalid_member(field, code.to_string(), echo(raw)))
            })
            .collect::<FilterResult<Vec<T>>>()?;
        Self::new(field, values)
    }

    /// Builds a set from raw textual codes (`"W"`, `"E"`, `"3"`).
    ///
    /// # Errors
    ///
    /// Same as [`EnumSet::from_codes`].
    pub fn from_texts(field: &'static str, raw: &[&str]) -> FilterResult<Self> {
        let values = raw
            .iter()
            .map(|&text| {
                T::from_text(text)
                    .ok_or_else(|| FilterError::invalid_member(field, text, echo(raw)))
            })
            .collect::<FilterResult<Vec<T>>>()?;
        Self::new(field, values)
    }
}

impl<T: Copy + PartialEq> EnumSet<T> {
    /// The field this set filters on.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Members in caller order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns true if `value` is a member.
    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// Number of members (always at least one).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over members in caller order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }
}

impl<T: ApiEnum + fmt::Display> Expression for EnumSet<T> {
    fn expr(&self) -> Option<String> {
        expr::compile(self.field, &self.values)
    }
}

impl<T: Serialize> Serialize for EnumSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

// ==================== IdSet ====================

/// A non-empty list of distinct raw identifiers bound to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet {
    field: &'static str,
    ids: Vec<i64>,
}

impl IdSet {
    /// Validates `ids` for `field`. Any integer is accepted.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn new(field: &'static str, ids: impl IntoIterator<Item = i64>) -> FilterResult<Self> {
        let ids: Vec<i64> = ids.into_iter().collect();
        check_distinct(field, &ids)?;
        Ok(Self { field, ids })
    }

    /// Builds a set from textual identifiers.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidMember` for text that is not an integer.
    pub fn parse(field: &'static str, raw: &[&str]) -> FilterResult<Self> {
        let ids = raw
            .iter()
            .map(|text| {
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| FilterError::invalid_member(field, *text, echo(raw)))
            })
            .collect::<FilterResult<Vec<i64>>>()?;
        Self::new(field, ids)
    }

    /// The field this set filters on.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Identifiers in caller order.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }
}

impl Expression for IdSet {
    fn expr(&self) -> Option<String> {
        expr::compile(self.field, &self.ids)
    }
}

impl Serialize for IdSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

// ==================== DateRange ====================

/// An inclusive research period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Validates a period against today's local date.
    ///
    /// # Errors
    ///
    /// See [`DateRange::new_as_of`].
    pub fn new(
        from: impl Into<Option<NaiveDate>>,
        to: impl Into<Option<NaiveDate>>,
    ) -> FilterResult<Self> {
        Self::new_as_of(from, to, Local::now().date_naive())
    }

    /// Validates a period against an explicit current date.
    ///
    /// # Errors
    ///
    /// - `FilterError::MissingRequired` if either endpoint is absent
    /// - `FilterError::InvertedRange` if `from > to`
    /// - `FilterError::FutureDate` if `to > today`
    pub fn new_as_of(
        from: impl Into<Option<NaiveDate>>,
        to: impl Into<Option<NaiveDate>>,
        today: NaiveDate,
    ) -> FilterResult<Self> {
        let from = from
            .into()
            .ok_or(FilterError::MissingRequired { field: "dateFrom" })?;
        let to = to
            .into()
            .ok_or(FilterError::MissingRequired { field: "dateTo" })?;

        if from > to {
            return Err(FilterError::inverted("researchDate", from, to));
        }
        if to > today {
            return Err(FilterError::FutureDate { to, today });
        }

        Ok(Self { from, to })
    }

    /// Parses ISO-8601 (`YYYY-MM-DD`) endpoints, validated against today.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidMember` for text that is not a date,
    /// plus the errors of [`DateRange::new_as_of`].
    pub fn parse(from: &str, to: &str) -> FilterResult<Self> {
        Self::parse_as_of(from, to, Local::now().date_naive())
    }

    /// Parses ISO-8601 endpoints against an explicit current date.
    ///
    /// # Errors
    ///
    /// Same as [`DateRange::parse`].
    pub fn parse_as_of(from: &str, to: &str, today: NaiveDate) -> FilterResult<Self> {
        let from = parse_date("dateFrom", from)?;
        let to = parse_date("dateTo", to)?;
        Self::new_as_of(from, to, today)
    }

    /// First day of the period.
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the period.
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Rendered periods. Always a single pair today; the service accepts a
    /// list of periods.
    pub fn expr(&self) -> Vec<(String, String)> {
        vec![(
            self.from.format(DATE_FORMAT).to_string(),
            self.to.format(DATE_FORMAT).to_string(),
        )]
    }
}

fn parse_date(field: &'static str, text: &str) -> FilterResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| FilterError::invalid_member(field, text, text))
}

// ==================== AgeRange ====================

/// Respondent age bounds, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    /// Validates `min < max`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvertedRange` when `min >= max`.
    pub fn new(min: u32, max: u32) -> FilterResult<Self> {
        if min >= max {
            return Err(FilterError::inverted("age", min, max));
        }
        Ok(Self { min, max })
    }

    /// An open-ended range, `min` and older.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvertedRange` when `min >= 99`.
    pub fn from_min(min: u32) -> FilterResult<Self> {
        Self::new(min, OPEN_AGE_MAX)
    }

    /// Lower bound, inclusive.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound, inclusive; 99 for an open-ended range.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Returns true for the "and older" form.
    pub fn is_open(&self) -> bool {
        self.max == OPEN_AGE_MAX
    }

    /// The bounds as a `(min, max)` pair.
    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    /// Label form: `25-45`, or `18+` for the open range.
    pub fn label(&self) -> String {
        if self.is_open() {
            format!("{}+", self.min)
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

impl Expression for AgeRange {
    fn expr(&self) -> Option<String> {
        Some(expr::between("age", self.min, self.max))
    }
}
