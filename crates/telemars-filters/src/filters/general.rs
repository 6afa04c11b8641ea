//! Date, calendar, location and company filters.

use chrono::NaiveDate;

use super::enum_filter;
use crate::error::FilterResult;
use crate::expr::{self, Expression};
use crate::params::{
    DayType, Location, RegionId, TvCompanyHoldingId, TvCompanyMediaHoldingId, TvNetId,
    TvThematicId, Weekday,
};
use crate::value::{DateRange, EnumSet, IdSet};

/// Research period filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    range: DateRange,
}

impl DateFilter {
    /// Builds the filter, validating against today's date.
    ///
    /// # Errors
    ///
    /// See [`DateRange::new_as_of`].
    pub fn new(
        date_from: impl Into<Option<NaiveDate>>,
        date_to: impl Into<Option<NaiveDate>>,
    ) -> FilterResult<Self> {
        Ok(Self {
            range: DateRange::new(date_from, date_to)?,
        })
    }

    /// Builds the filter from ISO-8601 strings.
    ///
    /// # Errors
    ///
    /// See [`DateRange::parse`].
    pub fn parse(date_from: &str, date_to: &str) -> FilterResult<Self> {
        Ok(Self {
            range: DateRange::parse(date_from, date_to)?,
        })
    }

    /// The validated period.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Periods as `(from, to)` pairs of `YYYY-MM-DD` strings.
    pub fn expr(&self) -> Vec<(String, String)> {
        self.range.expr()
    }
}

impl From<DateRange> for DateFilter {
    fn from(range: DateRange) -> Self {
        Self { range }
    }
}

enum_filter! {
    /// Day-of-week filter.
    WeekdayFilter, Weekday, "researchWeekDay"
}

enum_filter! {
    /// Day-type filter (weekday, weekend, holiday, mourning day).
    DaytypeFilter, DayType, "researchDayType"
}

enum_filter! {
    /// Viewing location filter.
    LocationFilter, Location, "locationId"
}

/// TV company filter.
///
/// Every field is optional. Set fields are combined with `AND`, in the
/// order they are declared here.
///
/// # Example
///
/// ```
/// use telemars_filters::expr::Expression;
/// use telemars_filters::filters::CompanyFilter;
/// use telemars_filters::params::TvNetId;
///
/// let filter = CompanyFilter::default()
///     .tv_company_id([1, 2])?
///     .tv_net_id([TvNetId::Domashniy])?;
/// assert_eq!(
///     filter.expr().as_deref(),
///     Some("tvCompanyId IN (1, 2) AND tvNetId = 257")
/// );
/// # Ok::<(), telemars_filters::FilterError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    tv_company_id: Option<IdSet>,
    tv_thematic_id: Option<EnumSet<TvThematicId>>,
    tv_net_id: Option<EnumSet<TvNetId>>,
    region_id: Option<EnumSet<RegionId>>,
    tv_company_holding_id: Option<EnumSet<TvCompanyHoldingId>>,
    tv_company_media_holding_id: Option<EnumSet<TvCompanyMediaHoldingId>>,
}

impl CompanyFilter {
    /// Restricts to TV company identifiers.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn tv_company_id(mut self, ids: impl IntoIterator<Item = i64>) -> FilterResult<Self> {
        self.tv_company_id = Some(IdSet::new("tvCompanyId", ids)?);
        Ok(self)
    }

    /// Restricts to thematic categories.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn tv_thematic_id(
        mut self,
        values: impl IntoIterator<Item = TvThematicId>,
    ) -> FilterResult<Self> {
        self.tv_thematic_id = Some(EnumSet::new("tvThematicId", values)?);
        Ok(self)
    }

    /// Restricts to networks.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn tv_net_id(mut self, values: impl IntoIterator<Item = TvNetId>) -> FilterResult<Self> {
        self.tv_net_id = Some(EnumSet::new("tvNetId", values)?);
        Ok(self)
    }

    /// Restricts to regions.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn region_id(mut self, values: impl IntoIterator<Item = RegionId>) -> FilterResult<Self> {
        self.region_id = Some(EnumSet::new("regionId", values)?);
        Ok(self)
    }

    /// Restricts to company holdings.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn tv_company_holding_id(
        mut self,
        values: impl IntoIterator<Item = TvCompanyHoldingId>,
    ) -> FilterResult<Self> {
        self.tv_company_holding_id = Some(EnumSet::new("tvCompanyHoldingId", values)?);
        Ok(self)
    }

    /// Restricts to media holdings.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn tv_company_media_holding_id(
        mut self,
        values: impl IntoIterator<Item = TvCompanyMediaHoldingId>,
    ) -> FilterResult<Self> {
        self.tv_company_media_holding_id = Some(EnumSet::new("tvCompanyMediaHoldingId", values)?);
        Ok(self)
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.expr().is_none()
    }
}

impl Expression for CompanyFilter {
    fn expr(&self) -> Option<String> {
        expr::all([
            self.tv_company_id.expr(),
            self.tv_thematic_id.expr(),
            self.tv_net_id.expr(),
            self.region_id.expr(),
            self.tv_company_holding_id.expr(),
            self.tv_company_media_holding_id.expr(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_weekday_filter_unset() {
        assert_eq!(WeekdayFilter::default().expr(), None);
        assert_eq!(WeekdayFilter::default().values(), None);
    }

    #[test]
    fn test_weekday_filter_single() {
        let filter = WeekdayFilter::new([Weekday::Monday]).unwrap();
        assert_eq!(filter.expr().as_deref(), Some("researchWeekDay = 1"));
    }

    #[test]
    fn test_weekday_filter_many() {
        let filter = WeekdayFilter::new([Weekday::Tuesday, Weekday::Thursday, Weekday::Saturday])
            .unwrap();
        assert_eq!(
            filter.expr().as_deref(),
            Some("researchWeekDay IN (2, 4, 6)")
        );
    }

    #[test]
    fn test_weekday_filter_invalid() {
        assert!(matches!(
            WeekdayFilter::new([]),
            Err(FilterError::EmptyCollection { .. })
        ));
        assert!(matches!(
            WeekdayFilter::from_codes(&[0, 8, 9, 10]),
            Err(FilterError::InvalidMember { .. })
        ));
        assert!(matches!(
            WeekdayFilter::new([Weekday::Monday, Weekday::Monday]),
            Err(FilterError::DuplicateValue { .. })
        ));
    }

    #[test]
    fn test_daytype_filter_text_codes() {
        let filter = DaytypeFilter::new([DayType::Weekday, DayType::MourningDay]).unwrap();
        assert_eq!(filter.expr().as_deref(), Some("researchDayType IN (W, F)"));
        assert!(DaytypeFilter::from_texts(&["5", "6"]).is_err());
    }

    #[test]
    fn test_location_filter() {
        let filter = LocationFilter::new([Location::Home, Location::OutOfHome]).unwrap();
        assert_eq!(filter.expr().as_deref(), Some("locationId IN (1, 4)"));
        assert!(LocationFilter::from_codes(&[0, 5, 6]).is_err());
    }

    #[test]
    fn test_company_filter_fields() {
        let filter = CompanyFilter::default()
            .tv_thematic_id([TvThematicId::Advertising, TvThematicId::Entertaining])
            .unwrap();
        assert_eq!(filter.expr().as_deref(), Some("tvThematicId IN (19, 8)"));

        let filter = CompanyFilter::default()
            .tv_company_holding_id([TvCompanyHoldingId::GazpromMedia])
            .unwrap();
        assert_eq!(filter.expr().as_deref(), Some("tvCompanyHoldingId = 1000042"));

        let filter = CompanyFilter::default()
            .tv_company_media_holding_id([TvCompanyMediaHoldingId::Media1])
            .unwrap();
        assert_eq!(filter.expr().as_deref(), Some("tvCompanyMediaHoldingId = 1"));
    }

    #[test]
    fn test_company_filter_combined() {
        let filter = CompanyFilter::default()
            .region_id([RegionId::Moscow, RegionId::SaintPetersburg])
            .unwrap()
            .tv_company_id([5, 10, 15])
            .unwrap();
        assert_eq!(
            filter.expr().as_deref(),
            Some("tvCompanyId IN (5, 10, 15) AND regionId IN (1, 2)")
        );
        assert!(!filter.is_empty());
        assert!(CompanyFilter::default().is_empty());
    }

    #[test]
    fn test_company_filter_rejects_duplicates() {
        let err = CompanyFilter::default()
            .tv_company_id([1, 1, 2, 3, 4, 5, 6, 7, 8, 9])
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::DuplicateValue {
                field: "tvCompanyId",
                ..
            }
        ));
    }

    #[test]
    fn test_date_filter_from_range() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let range = DateRange::parse_as_of("2025-07-07", "2025-07-31", today).unwrap();
        let filter = DateFilter::from(range);
        assert_eq!(
            filter.expr(),
            vec![("2025-07-07".to_string(), "2025-07-31".to_string())]
        );
    }

    #[test]
    fn test_date_filter_rejects_missing() {
        assert!(matches!(
            DateFilter::new(None::<NaiveDate>, None::<NaiveDate>),
            Err(FilterError::MissingRequired { .. })
        ));
    }
}
