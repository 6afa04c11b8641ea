//! Label command implementation.
//!
//! Builds a target audience from flags and prints its label and expression.

use telemars_filters::filters::DemographicFilter;
use telemars_filters::params::{IncomeGroup, IncomeLevel, KidsAge, KidsNum, Sex};
use telemars_filters::value::OPEN_AGE_MAX;
use telemars_filters::FilterError;
use tracing::debug;

use super::{CommandContext, Result};
use crate::cli::{KidsNumArg, SexArg};
use crate::output::{format_audience_json, format_audience_table};

/// Options for the label command.
#[derive(Debug, Default)]
pub struct LabelOptions {
    /// Age range text, `25-45` or `18+`.
    pub age: Option<String>,
    pub sex: Option<SexArg>,
    pub income_level: Vec<u32>,
    pub income_group: Vec<char>,
    /// Children-age bins to flag.
    pub kids_age: Vec<u32>,
    pub kids_num: Vec<KidsNumArg>,
}

/// Executes the label command.
///
/// # Errors
///
/// Returns `CommandError::Filter` if the options do not form a valid audience.
pub fn execute(ctx: &CommandContext, opts: &LabelOptions) -> Result<()> {
    let filter = build_filter(opts)?;
    debug!(?filter, "built audience");

    if ctx.json_output {
        println!("{}", format_audience_json(&filter)?);
    } else if !ctx.quiet {
        print!("{}", format_audience_table(&filter, ctx.use_colors));
    }

    Ok(())
}

/// Builds the audience described by `opts`.
pub fn build_filter(opts: &LabelOptions) -> Result<DemographicFilter> {
    let mut options = DemographicFilter::builder();

    if let Some(sex) = opts.sex {
        options = options.sex(match sex {
            SexArg::M => Sex::Male,
            SexArg::W => Sex::Female,
        });
    }
    if let Some(age) = &opts.age {
        let (min, max) = parse_age(age)?;
        options = options.age(min, max);
    }
    if !opts.income_level.is_empty() {
        let levels = opts
            .income_level
            .iter()
            .map(|&n| {
                IncomeLevel::from_number(n).ok_or_else(|| {
                    FilterError::invalid_member("incLevel", n.to_string(), n.to_string())
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        options = options.inc_level(levels);
    }
    if !opts.income_group.is_empty() {
        let input: String = opts.income_group.iter().collect();
        let groups = opts
            .income_group
            .iter()
            .map(|&letter| {
                IncomeGroup::from_letter(letter).ok_or_else(|| {
                    FilterError::invalid_member(
                        "incomeGroupRussia",
                        letter.to_string(),
                        input.as_str(),
                    )
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        options = options.inc_group(groups);
    }
    for &bin in &opts.kids_age {
        options = options.kids_age(bin as usize, [KidsAge::Yes]);
    }
    if !opts.kids_num.is_empty() {
        options = options.kids_num(opts.kids_num.iter().map(|&count| match count {
            KidsNumArg::Zero => KidsNum::NoKids,
            KidsNumArg::One => KidsNum::OneKid,
            KidsNumArg::Two => KidsNum::TwoKids,
            KidsNumArg::ThreePlus => KidsNum::ThreeOrMoreKids,
        }));
    }

    Ok(options.build()?)
}

/// Parses `25-45` or `18+`.
fn parse_age(text: &str) -> Result<(u32, u32)> {
    let invalid = || {
        FilterError::invalid_member("age", text, format!("{text}; expected MIN-MAX or MIN+"))
    };
    let number = |s: &str| s.trim().parse::<u32>().map_err(|_| invalid());

    let trimmed = text.trim();
    if let Some(min) = trimmed.strip_suffix('+') {
        return Ok((number(min)?, OPEN_AGE_MAX));
    }
    let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
    Ok((number(min)?, number(max)?))
}
