//! Enumeration tables for filter parameters.
//!
//! Every enumeration declares the external code the query service expects.
//! Filters render these codes, never the symbolic variant names. The tables
//! are static: each enum exposes its members through [`ApiEnum::ALL`] and
//! lookups are plain scans over that slice.

use std::fmt;
use std::hash::Hash;

pub mod general;
pub mod media;

pub use general::{
    kids_age_span, DayType, IncomeGroup, IncomeLevel, KidsAge, KidsNum, Location, RegionId, Sex,
    TvCompanyHoldingId, TvCompanyMediaHoldingId, TvNetId, TvThematicId, Weekday, KIDS_AGE_BINS,
};
pub use media::{
    AdIssueStatusId, AdTypeId, BreaksContentType, BreaksDistributionType, BreaksIssueStatusId,
    PlaybackType, Platform,
};

/// External code of an enumeration member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Numeric code, rendered as a bare integer.
    Int(i64),
    /// Short textual code, rendered verbatim without quotes.
    Text(&'static str),
}

impl Code {
    /// Returns the numeric value for integer codes.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Code::Int(n) => Some(*n),
            Code::Text(_) => None,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Int(n) => write!(f, "{n}"),
            Code::Text(s) => f.write_str(s),
        }
    }
}

/// A closed enumeration with declared external codes.
pub trait ApiEnum: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The code sent to the query service.
    fn code(self) -> Code;

    /// Looks up a member by numeric code.
    fn from_code(raw: i64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.code() == Code::Int(raw))
    }

    /// Looks up a member by its rendered code (`"W"`, `"3"`, ...).
    fn from_text(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.code().to_string() == raw)
    }
}

/// Declares an enumeration together with its code table.
///
/// `api_enum!(pub enum Weekday: Int { Monday = 1, ... })` expands to the enum,
/// its [`ApiEnum`] impl and a `Display` impl that prints the code.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::params::ApiEnum for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn code(self) -> $crate::params::Code {
                match self {
                    $( $name::$variant => $crate::params::Code::$kind($code) ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&$crate::params::ApiEnum::code(*self), f)
            }
        }
    };
}

pub(crate) use api_enum;
