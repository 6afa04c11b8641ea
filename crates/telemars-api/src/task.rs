//! Task definitions and the task document submitted to the service.
//!
//! A [`Task`] bundles a research period, optional filters, one or more
//! target audiences and the slices and statistics to compute. It is built
//! with [`Task::builder`] and checked once in [`TaskBuilder::build`];
//! [`Task::document`] renders the compiled expressions the service expects.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use telemars_filters::filters::{
    AdFilter, BreakFilter, CompanyFilter, DateFilter, DaytypeFilter, DemographicFilter,
    LocationFilter, PlatformFilter, PlaybackTypeFilter, WeekdayFilter,
};
use telemars_filters::Expression;

use crate::error::TaskError;

/// Kind of task, which selects the endpoint and the allowed filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Per-event report (ad spots, programs).
    Simple,
    /// Aggregated cross-tabulation.
    Crosstab,
}

impl TaskKind {
    /// Submission endpoint path.
    pub fn endpoint(self) -> &'static str {
        match self {
            TaskKind::Simple => "/task/simple",
            TaskKind::Crosstab => "/task/crosstab",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Simple => f.write_str("simple"),
            TaskKind::Crosstab => f.write_str("crosstab"),
        }
    }
}

/// A result column the rows are grouped by (`researchDate`, `tvCompanyName`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slice(String);

impl Slice {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Slice {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A computed measure (`RtgPer`, `SpotByBreaksSalesRtgPerAvg`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistic(String);

impl Statistic {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sales statistics are measured on the channel's sales audience, so
    /// their value does not depend on the target audience.
    pub fn is_sales(&self) -> bool {
        self.0.contains("Sales")
    }
}

impl From<&str> for Statistic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort direction for a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Kind of events a crosstab task is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Program,
    Breaks,
    Ad,
}

/// Task options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOptions {
    /// Measurement kit identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kit_id: Option<u32>,

    /// Include Big TV (out-of-home and internet) viewing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_tv: Option<bool>,

    /// Event kind, crosstab tasks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
}

/// A target audience together with the label its result columns carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAudience {
    name: String,
    filter: DemographicFilter,
}

impl TargetAudience {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &DemographicFilter {
        &self.filter
    }
}

/// A validated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    kind: TaskKind,
    date: DateFilter,
    weekday: Option<WeekdayFilter>,
    daytype: Option<DaytypeFilter>,
    company: Option<CompanyFilter>,
    location: Option<LocationFilter>,
    platform: Option<PlatformFilter>,
    playback: Option<PlaybackTypeFilter>,
    ad: Option<AdFilter>,
    breaks: Option<BreakFilter>,
    audiences: Vec<TargetAudience>,
    slices: Vec<Slice>,
    statistics: Vec<Statistic>,
    sortings: Vec<(Slice, SortOrder)>,
    options: TaskOptions,
}

impl Task {
    /// Starts a task over the given research period.
    pub fn builder(kind: TaskKind, date: DateFilter) -> TaskBuilder {
        TaskBuilder::new(kind, date)
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn date(&self) -> &DateFilter {
        &self.date
    }

    pub fn audiences(&self) -> &[TargetAudience] {
        &self.audiences
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    /// Renders the document submitted to the service.
    pub fn document(&self) -> TaskDocument {
        TaskDocument {
            filters: FilterDocument {
                date_filter: self.date.expr(),
                weekday_filter: self.weekday.expr(),
                daytype_filter: self.daytype.expr(),
                company_filter: self.company.expr(),
                location_filter: self.location.expr(),
                platform_filter: self.platform.expr(),
                playback_filter: self.playback.expr(),
                ad_filter: self.ad.expr(),
                break_filter: self.breaks.expr(),
            },
            target_audiences: self
                .audiences
                .iter()
                .map(|audience| AudienceDocument {
                    name: audience.name.clone(),
                    expr: audience.filter.expr(),
                })
                .collect(),
            slices: self.slices.clone(),
            statistics: self.statistics.clone(),
            sortings: self
                .sortings
                .iter()
                .map(|(slice, order)| Sorting {
                    slice: slice.clone(),
                    order: *order,
                })
                .collect(),
            options: self.options.clone(),
        }
    }
}

/// Builder for [`Task`].
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    kind: TaskKind,
    date: DateFilter,
    weekday: Option<WeekdayFilter>,
    daytype: Option<DaytypeFilter>,
    company: Option<CompanyFilter>,
    location: Option<LocationFilter>,
    platform: Option<PlatformFilter>,
    playback: Option<PlaybackTypeFilter>,
    ad: Option<AdFilter>,
    breaks: Option<BreakFilter>,
    audiences: Vec<DemographicFilter>,
    slices: Vec<Slice>,
    statistics: Vec<Statistic>,
    sortings: Vec<(Slice, SortOrder)>,
    options: TaskOptions,
}

impl TaskBuilder {
    fn new(kind: TaskKind, date: DateFilter) -> Self {
        Self {
            kind,
            date,
            weekday: None,
            daytype: None,
            company: None,
            location: None,
            platform: None,
            playback: None,
            ad: None,
            breaks: None,
            audiences: Vec::new(),
            slices: Vec::new(),
            statistics: Vec::new(),
            sortings: Vec::new(),
            options: TaskOptions::default(),
        }
    }

    pub fn weekday(mut self, filter: WeekdayFilter) -> Self {
        self.weekday = Some(filter);
        self
    }

    pub fn daytype(mut self, filter: DaytypeFilter) -> Self {
        self.daytype = Some(filter);
        self
    }

    pub fn company(mut self, filter: CompanyFilter) -> Self {
        self.company = Some(filter);
        self
    }

    pub fn location(mut self, filter: LocationFilter) -> Self {
        self.location = Some(filter);
        self
    }

    pub fn platform(mut self, filter: PlatformFilter) -> Self {
        self.platform = Some(filter);
        self
    }

    pub fn playback(mut self, filter: PlaybackTypeFilter) -> Self {
        self.playback = Some(filter);
        self
    }

    /// Advertising filter. Simple tasks only.
    pub fn ad(mut self, filter: AdFilter) -> Self {
        self.ad = Some(filter);
        self
    }

    /// Break filter. Crosstab tasks only.
    pub fn breaks(mut self, filter: BreakFilter) -> Self {
        self.breaks = Some(filter);
        self
    }

    /// Adds a target audience.
    pub fn audience(mut self, filter: DemographicFilter) -> Self {
        self.audiences.push(filter);
        self
    }

    pub fn slice(mut self, slice: impl Into<Slice>) -> Self {
        self.slices.push(slice.into());
        self
    }

    pub fn statistic(mut self, statistic: impl Into<Statistic>) -> Self {
        self.statistics.push(statistic.into());
        self
    }

    /// Sorts the result by `slice`, which must also be requested as a slice.
    pub fn sort(mut self, slice: impl Into<Slice>, order: SortOrder) -> Self {
        self.sortings.push((slice.into(), order));
        self
    }

    pub fn options(mut self, options: TaskOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the task.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Invalid` when slices, statistics or audiences are
    /// missing or repeated, an audience has no label, a sorting names a slice
    /// that is not requested, or a filter or option does not apply to the
    /// task kind.
    pub fn build(self) -> Result<Task, TaskError> {
        if self.slices.is_empty() {
            return Err(TaskError::invalid("at least one slice is required"));
        }
        if self.statistics.is_empty() {
            return Err(TaskError::invalid("at least one statistic is required"));
        }
        if self.audiences.is_empty() {
            return Err(TaskError::invalid("at least one target audience is required"));
        }
        ensure_distinct("slice", &self.slices)?;
        ensure_distinct("statistic", &self.statistics)?;

        for (slice, _) in &self.sortings {
            if !self.slices.contains(slice) {
                return Err(TaskError::invalid(format!(
                    "cannot sort by '{slice}': it is not one of the requested slices"
                )));
            }
        }

        match self.kind {
            TaskKind::Simple => {
                if self.breaks.is_some() {
                    return Err(TaskError::invalid("break filter applies to crosstab tasks only"));
                }
                if self.options.issue_type.is_some() {
                    return Err(TaskError::invalid("issueType applies to crosstab tasks only"));
                }
            }
            TaskKind::Crosstab => {
                if self.ad.is_some() {
                    return Err(TaskError::invalid("ad filter applies to simple tasks only"));
                }
            }
        }

        let mut audiences = Vec::with_capacity(self.audiences.len());
        for (i, filter) in self.audiences.into_iter().enumerate() {
            let name = filter.name().ok_or_else(|| {
                TaskError::invalid(format!(
                    "target audience {} has no label; set its age or sex",
                    i + 1
                ))
            })?;
            audiences.push(TargetAudience { name, filter });
        }
        let names: Vec<&str> = audiences.iter().map(TargetAudience::name).collect();
        ensure_distinct("target audience", &names)?;

        Ok(Task {
            kind: self.kind,
            date: self.date,
            weekday: self.weekday,
            daytype: self.daytype,
            company: self.company,
            location: self.location,
            platform: self.platform,
            playback: self.playback,
            ad: self.ad,
            breaks: self.breaks,
            audiences,
            slices: self.slices,
            statistics: self.statistics,
            sortings: self.sortings,
            options: self.options,
        })
    }
}

fn ensure_distinct<T: fmt::Display + Eq + std::hash::Hash>(
    what: &str,
    items: &[T],
) -> Result<(), TaskError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(TaskError::invalid(format!("duplicate {what} '{item}'")));
        }
    }
    Ok(())
}

// ==================== Wire document ====================

/// The task document, as submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    pub filters: FilterDocument,
    pub target_audiences: Vec<AudienceDocument>,
    pub slices: Vec<Slice>,
    pub statistics: Vec<Statistic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sortings: Vec<Sorting>,
    pub options: TaskOptions,
}

/// Compiled filter expressions. Unset filters are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDocument {
    pub date_filter: Vec<(String, String)>,
    #[serde(rename = "weekDayFilter", skip_serializing_if = "Option::is_none")]
    pub weekday_filter: Option<String>,
    #[serde(rename = "dayTypeFilter", skip_serializing_if = "Option::is_none")]
    pub daytype_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_filter: Option<String>,
    #[serde(rename = "playBackTypeFilter", skip_serializing_if = "Option::is_none")]
    pub playback_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_filter: Option<String>,
    #[serde(rename = "breaksFilter", skip_serializing_if = "Option::is_none")]
    pub break_filter: Option<String>,
}

/// One entry of `targetAudiences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudienceDocument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
}

/// One entry of `sortings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sorting {
    pub slice: Slice,
    pub order: SortOrder,
}
