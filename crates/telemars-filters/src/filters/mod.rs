//! Filter objects submitted with a task.
//!
//! Each filter validates its parameters when it is built and compiles to an
//! expression fragment through [`Expression::expr`](crate::expr::Expression).
//! An unset filter (the `Default` value) compiles to `None`.
//!
//! - [`general`] - date, weekday, day type, location and company filters
//! - [`media`] - platform, playback, advertising and break filters
//! - [`demographic`] - target audience filter with its label

pub mod demographic;
pub mod general;
pub mod media;

pub use demographic::{DemographicFilter, DemographicOptions};
pub use general::{CompanyFilter, DateFilter, DaytypeFilter, LocationFilter, WeekdayFilter};
pub use media::{AdFilter, BreakFilter, PlaybackTypeFilter, PlatformFilter};

/// Declares a filter over a single enumerated field.
macro_rules! enum_filter {
    (
        $(#[$meta:meta])*
        $name:ident, $member:ty, $field:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            values: Option<$crate::value::EnumSet<$member>>,
        }

        impl $name {
            /// Field name used in the compiled expression.
            pub const FIELD: &'static str = $field;

            /// Builds the filter from typed members.
            ///
            /// # Errors
            ///
            /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
            pub fn new(
                values: impl IntoIterator<Item = $member>,
            ) -> $crate::error::FilterResult<Self> {
                Ok(Self {
                    values: Some($crate::value::EnumSet::new(Self::FIELD, values)?),
                })
            }

            /// Builds the filter from raw codes.
            ///
            /// # Errors
            ///
            /// Returns `FilterError::InvalidMember` for unknown codes, plus
            /// the errors of `new`.
            pub fn from_codes(raw: &[i64]) -> $crate::error::FilterResult<Self> {
                Ok(Self {
                    values: Some($crate::value::EnumSet::from_codes(Self::FIELD, raw)?),
                })
            }

            /// Builds the filter from raw textual codes.
            ///
            /// # Errors
            ///
            /// Same as `from_codes`.
            pub fn from_texts(raw: &[&str]) -> $crate::error::FilterResult<Self> {
                Ok(Self {
                    values: Some($crate::value::EnumSet::from_texts(Self::FIELD, raw)?),
                })
            }

            /// Selected members, if the filter is set.
            pub fn values(&self) -> Option<&[$member]> {
                self.values.as_ref().map(|set| set.values())
            }
        }

        impl $crate::expr::Expression for $name {
            fn expr(&self) -> Option<String> {
                $crate::expr::Expression::expr(&self.values)
            }
        }
    };
}

pub(crate) use enum_filter;
