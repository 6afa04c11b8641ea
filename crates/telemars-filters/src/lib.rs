//! Validated filters for the Mediascope TV Index API.
//!
//! Filters describe which viewing data a task covers: the research period,
//! weekdays, viewing locations, TV companies and the target audiences. Each
//! filter validates its values once, when it is built, and compiles to an
//! expression fragment the task service understands:
//!
//! ```
//! use telemars_filters::prelude::*;
//!
//! let weekdays = WeekdayFilter::new([Weekday::Monday, Weekday::Friday])?;
//! assert_eq!(weekdays.expr().as_deref(), Some("researchWeekDay IN (1, 5)"));
//!
//! let audience: DemographicFilter = "W 25-50 IL 1-3,6".parse()?;
//! assert_eq!(
//!     audience.expr().as_deref(),
//!     Some("sex = 2 AND age >= 25 AND age <= 50 AND incLevel IN (1, 2, 3, 6)")
//! );
//! # Ok::<(), telemars_filters::FilterError>(())
//! ```
//!
//! Target audiences also have a compact label (`W 25-50 IL 1-3,6`), see
//! [`audience`].

pub mod audience;
pub mod compress;
pub mod error;
pub mod expr;
pub mod filters;
pub mod params;
pub mod value;

pub use audience::ParseError;
pub use error::{FilterError, FilterResult};
pub use expr::Expression;

/// Commonly used types.
pub mod prelude {
    pub use crate::audience::{encode as encode_audience, parse as parse_audience};
    pub use crate::compress::compress;
    pub use crate::error::{FilterError, FilterResult};
    pub use crate::expr::Expression;
    pub use crate::filters::{
        AdFilter, BreakFilter, CompanyFilter, DateFilter, DaytypeFilter, DemographicFilter,
        DemographicOptions, LocationFilter, PlatformFilter, PlaybackTypeFilter, WeekdayFilter,
    };
    pub use crate::params::*;
    pub use crate::value::{AgeRange, DateRange, EnumSet, IdSet};
}
