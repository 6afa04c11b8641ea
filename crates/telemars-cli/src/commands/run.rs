//! Run command implementation.
//!
//! Loads a task file, submits the task and prints the flattened result.
//!
//! A task file is TOML; audiences are written as labels:
//!
//! ```toml
//! kind = "crosstab"
//! date_from = "2024-06-01"
//! date_to = "2024-08-31"
//! audiences = ["All 25-54", "W 18+"]
//! slices = ["tvCompanyName"]
//! statistics = ["SpotByBreaksRtgPerAvg"]
//!
//! [[sortings]]
//! slice = "tvCompanyName"
//! order = "ASC"
//!
//! [filters]
//! location = [1, 2]
//!
//! [filters.breaks]
//! breaks_distribution_type = ["N", "O"]
//!
//! [options]
//! kitId = 1
//! issueType = "BREAKS"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use telemars_api::client::{MediascopeClient, BASE_URL};
use telemars_api::task::{SortOrder, Task, TaskKind, TaskOptions};
use telemars_filters::error::FilterResult;
use telemars_filters::filters::{
    AdFilter, BreakFilter, CompanyFilter, DateFilter, DaytypeFilter, DemographicFilter,
    LocationFilter, PlatformFilter, PlaybackTypeFilter, WeekdayFilter,
};
use telemars_filters::params::ApiEnum;
use telemars_filters::value::EnumSet;
use tracing::{debug, info};

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_result_json, format_result_table};

/// Options for the run command.
#[derive(Debug)]
pub struct RunOptions {
    /// Path to the task file.
    pub file: PathBuf,
    /// Poll interval override, in seconds.
    pub poll_interval: Option<u64>,
    /// Timeout override, in seconds.
    pub timeout: Option<u64>,
}

/// A task as written in a task file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    pub kind: TaskKind,
    pub date_from: String,
    pub date_to: String,
    pub audiences: Vec<String>,
    pub slices: Vec<String>,
    pub statistics: Vec<String>,
    #[serde(default)]
    pub sortings: Vec<SortingEntry>,
    #[serde(default)]
    pub filters: FilterSection,
    #[serde(default)]
    pub options: TaskOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortingEntry {
    pub slice: String,
    pub order: SortOrder,
}

/// Optional filters, as raw codes.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSection {
    pub weekday: Option<Vec<i64>>,
    pub daytype: Option<Vec<String>>,
    pub location: Option<Vec<i64>>,
    pub platform: Option<Vec<i64>>,
    pub playback: Option<Vec<i64>>,
    pub company: Option<CompanySection>,
    pub ad: Option<AdSection>,
    pub breaks: Option<BreakSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanySection {
    pub tv_company_id: Option<Vec<i64>>,
    pub tv_thematic_id: Option<Vec<i64>>,
    pub tv_net_id: Option<Vec<i64>>,
    pub region_id: Option<Vec<i64>>,
    pub tv_company_holding_id: Option<Vec<i64>>,
    pub tv_company_media_holding_id: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdSection {
    pub advertiser_id: Option<Vec<i64>>,
    pub ad_issue_status_id: Option<Vec<String>>,
    pub ad_type_id: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakSection {
    pub breaks_content_type: Option<Vec<String>>,
    pub breaks_issue_status_id: Option<Vec<String>>,
    pub breaks_distribution_type: Option<Vec<String>>,
}

impl TaskFile {
    /// Reads and parses a task file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CommandError::TaskFile(format!("{}: {}", path.display(), e)))
    }

    /// Validates every filter and audience and builds the task.
    pub fn into_task(self) -> Result<Task> {
        let date = DateFilter::parse(&self.date_from, &self.date_to)?;
        let mut builder = Task::builder(self.kind, date);

        for label in &self.audiences {
            let audience: DemographicFilter = label.parse()?;
            builder = builder.audience(audience);
        }
        for slice in self.slices {
            builder = builder.slice(slice.as_str());
        }
        for statistic in self.statistics {
            builder = builder.statistic(statistic.as_str());
        }
        for sorting in self.sortings {
            builder = builder.sort(sorting.slice.as_str(), sorting.order);
        }

        let filters = self.filters;
        if let Some(raw) = &filters.weekday {
            builder = builder.weekday(WeekdayFilter::from_codes(raw)?);
        }
        if let Some(raw) = &filters.daytype {
            builder = builder.daytype(DaytypeFilter::from_texts(&as_strs(raw))?);
        }
        if let Some(raw) = &filters.location {
            builder = builder.location(LocationFilter::from_codes(raw)?);
        }
        if let Some(raw) = &filters.platform {
            builder = builder.platform(PlatformFilter::from_codes(raw)?);
        }
        if let Some(raw) = &filters.playback {
            builder = builder.playback(PlaybackTypeFilter::from_codes(raw)?);
        }
        if let Some(section) = &filters.company {
            builder = builder.company(section.to_filter()?);
        }
        if let Some(section) = &filters.ad {
            builder = builder.ad(section.to_filter()?);
        }
        if let Some(section) = &filters.breaks {
            builder = builder.breaks(section.to_filter()?);
        }

        Ok(builder.options(self.options).build()?)
    }
}

impl CompanySection {
    fn to_filter(&self) -> FilterResult<CompanyFilter> {
        let mut filter = CompanyFilter::default();
        if let Some(ids) = &self.tv_company_id {
            filter = filter.tv_company_id(ids.iter().copied())?;
        }
        if let Some(raw) = &self.tv_thematic_id {
            filter = filter.tv_thematic_id(codes("tvThematicId", raw)?)?;
        }
        if let Some(raw) = &self.tv_net_id {
            filter = filter.tv_net_id(codes("tvNetId", raw)?)?;
        }
        if let Some(raw) = &self.region_id {
            filter = filter.region_id(codes("regionId", raw)?)?;
        }
        if let Some(raw) = &self.tv_company_holding_id {
            filter = filter.tv_company_holding_id(codes("tvCompanyHoldingId", raw)?)?;
        }
        if let Some(raw) = &self.tv_company_media_holding_id {
            filter = filter.tv_company_media_holding_id(codes("tvCompanyMediaHoldingId", raw)?)?;
        }
        Ok(filter)
    }
}

impl AdSection {
    fn to_filter(&self) -> FilterResult<AdFilter> {
        let mut filter = AdFilter::default();
        if let Some(ids) = &self.advertiser_id {
            filter = filter.advertiser_id(ids.iter().copied())?;
        }
        if let Some(raw) = &self.ad_issue_status_id {
            filter = filter.ad_issue_status_id(texts("adIssueStatusId", raw)?)?;
        }
        if let Some(raw) = &self.ad_type_id {
            filter = filter.ad_type_id(codes("adTypeId", raw)?)?;
        }
        Ok(filter)
    }
}

impl BreakSection {
    fn to_filter(&self) -> FilterResult<BreakFilter> {
        let mut filter = BreakFilter::default();
        if let Some(raw) = &self.breaks_content_type {
            filter = filter.breaks_content_type(texts("breaksContentType", raw)?)?;
        }
        if let Some(raw) = &self.breaks_issue_status_id {
            filter = filter.breaks_issue_status_id(texts("breaksIssueStatusId", raw)?)?;
        }
        if let Some(raw) = &self.breaks_distribution_type {
            filter = filter.breaks_distribution_type(texts("breaksDistributionType", raw)?)?;
        }
        Ok(filter)
    }
}

fn as_strs(raw: &[String]) -> Vec<&str> {
    raw.iter().map(String::as_str).collect()
}

/// Resolves integer codes to members of `T`.
fn codes<T: ApiEnum + fmt::Display>(field: &'static str, raw: &[i64]) -> FilterResult<Vec<T>> {
    Ok(EnumSet::<T>::from_codes(field, raw)?.values().to_vec())
}

/// Resolves textual codes to members of `T`.
fn texts<T: ApiEnum + fmt::Display>(field: &'static str, raw: &[String]) -> FilterResult<Vec<T>> {
    Ok(EnumSet::<T>::from_texts(field, &as_strs(raw))?.values().to_vec())
}

/// Executes the run command.
///
/// # Errors
///
/// Returns an error if the task file is invalid, the task fails or the
/// service cannot be reached.
pub async fn execute(ctx: &CommandContext, opts: &RunOptions, token: &str) -> Result<()> {
    let config = load_config()?;
    let poll_interval = opts
        .poll_interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.task.poll_interval());
    let timeout = opts
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.task.timeout());
    let base_url = config.base_url.as_deref().unwrap_or(BASE_URL);

    let client =
        MediascopeClient::with_base_url(token, base_url).with_polling(poll_interval, timeout);
    run_with_client(ctx, &opts.file, &client).await
}

/// Runs the task file at `path` against `client`.
pub async fn run_with_client(
    ctx: &CommandContext,
    path: &Path,
    client: &MediascopeClient,
) -> Result<()> {
    let task = TaskFile::load(path)?.into_task()?;
    debug!(path = %path.display(), kind = %task.kind(), "loaded task file");

    let table = client.execute(&task).await?;
    info!(rows = table.rows.len(), "printing result");

    if ctx.json_output {
        println!("{}", format_result_json(&table)?);
    } else if !ctx.quiet {
        print!("{}", format_result_table(&table, ctx.use_colors));
    }

    Ok(())
}
