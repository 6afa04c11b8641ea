//! Audience output formatting.

use serde::Serialize;
use telemars_filters::compress::compress;
use telemars_filters::expr::Expression;
use telemars_filters::filters::DemographicFilter;
use telemars_filters::params::{kids_age_span, IncomeLevel, KidsAge, KIDS_AGE_BINS};

use super::helpers::format_key;

/// JSON output structure for an audience.
#[derive(Serialize)]
pub struct AudienceOutput<'a> {
    pub label: Option<String>,
    pub expr: Option<String>,
    pub filter: &'a DemographicFilter,
}

/// Formats an audience as JSON.
pub fn format_audience_json(filter: &DemographicFilter) -> Result<String, serde_json::Error> {
    let output = AudienceOutput {
        label: filter.name(),
        expr: filter.expr(),
        filter,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats an audience as a key/value listing of the set fields.
pub fn format_audience_table(filter: &DemographicFilter, use_colors: bool) -> String {
    let mut rows: Vec<(&str, String)> = vec![(
        "Label",
        filter
            .name()
            .unwrap_or_else(|| "(none: set an age or sex)".to_string()),
    )];

    if let Some(sex) = filter.sex() {
        rows.push(("Sex", sex.label().to_string()));
    }
    if let Some(age) = filter.age() {
        rows.push(("Age", age.label()));
    }
    if let Some(levels) = filter.inc_level() {
        rows.push(("Income levels", compress(levels.iter().map(IncomeLevel::number))));
    }
    if let Some(groups) = filter.inc_group() {
        let letters: String = groups.iter().filter_map(|g| g.letter()).collect();
        rows.push(("Income groups", letters));
    }
    let children = children_summary(filter);
    if !children.is_empty() {
        rows.push(("Children", children.join(", ")));
    }
    if let Some(counts) = filter.kids_num() {
        let labels: Vec<&str> = counts.iter().map(|c| c.label()).collect();
        rows.push(("Children count", labels.join(", ")));
    }
    rows.push(("Expression", filter.expr().unwrap_or_default()));

    let mut output = String::new();
    for (key, value) in rows {
        output.push_str(&format_key(key, use_colors));
        output.push_str(&value);
        output.push('\n');
    }
    output
}

/// Flagged children-age bins as readable spans.
fn children_summary(filter: &DemographicFilter) -> Vec<String> {
    (1..=KIDS_AGE_BINS)
        .filter(|&bin| {
            filter
                .kids_age(bin)
                .is_some_and(|set| set.contains(KidsAge::Yes))
        })
        .map(|bin| match kids_age_span(bin) {
            Some((lo, hi)) if lo == hi => format!("age {lo}"),
            Some((lo, hi)) => format!("age {lo}-{hi}"),
            None => "none".to_string(),
        })
        .collect()
}
