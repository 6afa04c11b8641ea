//! Platform, playback, advertising and break filters.

use super::enum_filter;
use crate::error::FilterResult;
use crate::expr::{self, Expression};
use crate::params::{
    AdIssueStatusId, AdTypeId, BreaksContentType, BreaksDistributionType, BreaksIssueStatusId,
    PlaybackType, Platform,
};
use crate::value::{EnumSet, IdSet};

enum_filter! {
    /// Viewing platform filter.
    PlatformFilter, Platform, "platformId"
}

enum_filter! {
    /// Live/recorded playback filter.
    PlaybackTypeFilter, PlaybackType, "playBackTypeId"
}

/// Advertising filter for simple tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilter {
    advertiser_id: Option<IdSet>,
    ad_issue_status_id: Option<EnumSet<AdIssueStatusId>>,
    ad_type_id: Option<EnumSet<AdTypeId>>,
}

impl AdFilter {
    /// Restricts to advertiser identifiers.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn advertiser_id(mut self, ids: impl IntoIterator<Item = i64>) -> FilterResult<Self> {
        self.advertiser_id = Some(IdSet::new("advertiserId", ids)?);
        Ok(self)
    }

    /// Restricts to issue statuses.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn ad_issue_status_id(
        mut self,
        values: impl IntoIterator<Item = AdIssueStatusId>,
    ) -> FilterResult<Self> {
        self.ad_issue_status_id = Some(EnumSet::new("adIssueStatusId", values)?);
        Ok(self)
    }

    /// Restricts to placement kinds.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn ad_type_id(mut self, values: impl IntoIterator<Item = AdTypeId>) -> FilterResult<Self> {
        self.ad_type_id = Some(EnumSet::new("adTypeId", values)?);
        Ok(self)
    }
}

impl Expression for AdFilter {
    fn expr(&self) -> Option<String> {
        expr::all([
            self.advertiser_id.expr(),
            self.ad_issue_status_id.expr(),
            self.ad_type_id.expr(),
        ])
    }
}

/// Advertising break filter for crosstab tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakFilter {
    breaks_content_type: Option<EnumSet<BreaksContentType>>,
    breaks_issue_status_id: Option<EnumSet<BreaksIssueStatusId>>,
    breaks_distribution_type: Option<EnumSet<BreaksDistributionType>>,
}

impl BreakFilter {
    /// Restricts to break content types.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn breaks_content_type(
        mut self,
        values: impl IntoIterator<Item = BreaksContentType>,
    ) -> FilterResult<Self> {
        self.breaks_content_type = Some(EnumSet::new("breaksContentType", values)?);
        Ok(self)
    }

    /// Restricts to break issue statuses.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn breaks_issue_status_id(
        mut self,
        values: impl IntoIterator<Item = BreaksIssueStatusId>,
    ) -> FilterResult<Self> {
        self.breaks_issue_status_id = Some(EnumSet::new("breaksIssueStatusId", values)?);
        Ok(self)
    }

    /// Restricts to distribution types.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyCollection` or `FilterError::DuplicateValue`.
    pub fn breaks_distribution_type(
        mut self,
        values: impl IntoIterator<Item = BreaksDistributionType>,
    ) -> FilterResult<Self> {
        self.breaks_distribution_type = Some(EnumSet::new("breaksDistributionType", values)?);
        Ok(self)
    }
}

impl Expression for BreakFilter {
    fn expr(&self) -> Option<String> {
        expr::all([
            self.breaks_content_type.expr(),
            self.breaks_issue_status_id.expr(),
            self.breaks_distribution_type.expr(),
        ])
    }
}
