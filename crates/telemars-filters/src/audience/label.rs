//! Audience label encoder.

use crate::compress::compress;
use crate::filters::DemographicFilter;
use crate::params::{kids_age_span, IncomeLevel, KidsAge, KIDS_AGE_BINS};

/// Label used for sex-agnostic audiences.
pub const ALL_ANCHOR: &str = "All";

/// Prefix of the income-level term.
pub const INCOME_LEVEL_PREFIX: &str = "IL";

/// Prefix of a children-age term.
pub const KIDS_AGE_PREFIX: &str = "KIDS AGE";

/// Label of children-age bin 1.
pub const NO_KIDS: &str = "NO KIDS";

/// Encodes an audience as a label such as `W 25-50 IL 1-3 AB KIDS AGE 2-6`.
///
/// Returns `None` when neither sex nor age is set. When age is unset the
/// label is the sex anchor alone.
pub fn encode(filter: &DemographicFilter) -> Option<String> {
    if filter.sex().is_none() && filter.age().is_none() {
        return None;
    }

    let mut terms: Vec<String> = Vec::new();
    terms.push(
        filter
            .sex()
            .map_or(ALL_ANCHOR, |sex| sex.label())
            .to_string(),
    );
    if let Some(age) = filter.age() {
        terms.push(age.label());
    }

    if let Some(levels) = filter.inc_level() {
        let numbers = levels.iter().map(IncomeLevel::number);
        terms.push(format!("{INCOME_LEVEL_PREFIX} {}", compress(numbers)));
    }

    if let Some(groups) = filter.inc_group() {
        let letters: String = groups.iter().filter_map(|group| group.letter()).collect();
        if !letters.is_empty() {
            terms.push(letters);
        }
    }

    terms.extend(children_terms(filter));

    Some(terms.join(" "))
}

/// Children terms: age bins when any bin is set, otherwise the count.
///
/// A bin set only to `No` contributes no term but still suppresses the
/// count.
fn children_terms(filter: &DemographicFilter) -> Vec<String> {
    let any_bin_set = (1..=KIDS_AGE_BINS).any(|bin| filter.kids_age(bin).is_some());
    let flagged: Vec<usize> = (1..=KIDS_AGE_BINS)
        .filter(|&bin| {
            filter
                .kids_age(bin)
                .is_some_and(|set| set.contains(KidsAge::Yes))
        })
        .collect();

    if !any_bin_set {
        return filter
            .kids_num()
            .map(|counts| {
                let labels: Vec<&str> = counts.iter().map(|count| count.label()).collect();
                vec![labels.join(",")]
            })
            .unwrap_or_default();
    }

    let mut terms = Vec::new();
    if flagged.first() == Some(&1) {
        terms.push(NO_KIDS.to_string());
    }

    // One term per run of adjacent bins.
    let spans: Vec<usize> = flagged.into_iter().filter(|&bin| bin > 1).collect();
    let mut start = 0;
    for i in 1..=spans.len() {
        if i == spans.len() || spans[i] != spans[i - 1] + 1 {
            if let Some(term) = kids_age_term(spans[start], spans[i - 1]) {
                terms.push(term);
            }
            start = i;
        }
    }
    terms
}

fn kids_age_term(first_bin: usize, last_bin: usize) -> Option<String> {
    let (lo, _) = kids_age_span(first_bin)?;
    let (_, hi) = kids_age_span(last_bin)?;
    Some(if lo == hi {
        format!("{KIDS_AGE_PREFIX} {lo}")
    } else {
        format!("{KIDS_AGE_PREFIX} {lo}-{hi}")
    })
}
