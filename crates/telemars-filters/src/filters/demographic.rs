//! Target audience filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::audience;
use crate::error::{FilterError, FilterResult};
use crate::expr::{self, Expression};
use crate::params::{IncomeGroup, IncomeLevel, KidsAge, KidsNum, Sex, KIDS_AGE_BINS};
use crate::value::{AgeRange, EnumSet};

/// Field names of the children-age bins, indexed by `bin - 1`.
const KIDS_AGE_FIELDS: [&str; KIDS_AGE_BINS] = [
    "kidsAge1", "kidsAge2", "kidsAge3", "kidsAge4", "kidsAge5", "kidsAge6", "kidsAge7",
];

/// Raw options for a [`DemographicFilter`].
///
/// Every recognized option is listed here and defaults to absent. The
/// chainable setters only record values; validation happens in
/// [`DemographicOptions::build`].
///
/// # Example
///
/// ```
/// use telemars_filters::filters::DemographicOptions;
/// use telemars_filters::params::{IncomeLevel, Sex};
///
/// let filter = DemographicOptions::default()
///     .sex(Sex::Female)
///     .age(25, 50)
///     .inc_level([IncomeLevel::L1, IncomeLevel::L2, IncomeLevel::L3])
///     .build()?;
/// assert_eq!(filter.name().as_deref(), Some("W 25-50 IL 1-3"));
/// # Ok::<(), telemars_filters::FilterError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicOptions {
    pub sex: Option<Sex>,
    /// Age bounds as `(min, max)`; `max` of 99 means open-ended.
    pub age: Option<(u32, u32)>,
    pub inc_level: Option<Vec<IncomeLevel>>,
    /// Income groups, kept in the order supplied.
    pub inc_group: Option<Vec<IncomeGroup>>,
    /// Children-age bins 1..=7, indexed by `bin - 1`.
    pub kids_age: [Option<Vec<KidsAge>>; KIDS_AGE_BINS],
    pub kids_num: Option<Vec<KidsNum>>,
    #[serde(skip)]
    invalid_bin: Option<usize>,
}

impl DemographicOptions {
    /// Sets the sex.
    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Sets the age range; pass `99` as `max` for `min` and older.
    pub fn age(mut self, min: u32, max: u32) -> Self {
        self.age = Some((min, max));
        self
    }

    /// Sets the income levels.
    pub fn inc_level(mut self, levels: impl IntoIterator<Item = IncomeLevel>) -> Self {
        self.inc_level = Some(levels.into_iter().collect());
        self
    }

    /// Sets the income groups.
    pub fn inc_group(mut self, groups: impl IntoIterator<Item = IncomeGroup>) -> Self {
        self.inc_group = Some(groups.into_iter().collect());
        self
    }

    /// Sets children-age bin `bin` (1-based). Bins outside `1..=7` are
    /// reported by [`DemographicOptions::build`].
    pub fn kids_age(mut self, bin: usize, values: impl IntoIterator<Item = KidsAge>) -> Self {
        let values: Vec<KidsAge> = values.into_iter().collect();
        match bin.checked_sub(1).and_then(|i| self.kids_age.get_mut(i)) {
            Some(slot) => *slot = Some(values),
            None => self.invalid_bin = Some(bin),
        }
        self
    }

    /// Sets the accepted children counts.
    pub fn kids_num(mut self, counts: impl IntoIterator<Item = KidsNum>) -> Self {
        self.kids_num = Some(counts.into_iter().collect());
        self
    }

    /// Validates every set option.
    ///
    /// # Errors
    ///
    /// Returns the first `FilterError` raised by a set option, in field
    /// order: sex, age, income level, income group, children bins,
    /// children count.
    pub fn build(self) -> FilterResult<DemographicFilter> {
        if let Some(bin) = self.invalid_bin {
            return Err(FilterError::invalid_member("kidsAge", bin.to_string(), bin.to_string()));
        }

        let age = self
            .age
            .map(|(min, max)| AgeRange::new(min, max))
            .transpose()?;
        let inc_level = self
            .inc_level
            .map(|levels| EnumSet::new("incLevel", levels))
            .transpose()?;
        let inc_group = self
            .inc_group
            .map(|groups| EnumSet::new("incomeGroupRussia", groups))
            .transpose()?;

        let mut kids_age: [Option<EnumSet<KidsAge>>; KIDS_AGE_BINS] = Default::default();
        for (slot, (values, field)) in kids_age
            .iter_mut()
            .zip(self.kids_age.into_iter().zip(KIDS_AGE_FIELDS))
        {
            *slot = values.map(|v| EnumSet::new(field, v)).transpose()?;
        }

        let kids_num = self
            .kids_num
            .map(|counts| EnumSet::new("kidsNum", counts))
            .transpose()?;

        Ok(DemographicFilter {
            sex: self.sex,
            age,
            inc_level,
            inc_group,
            kids_age,
            kids_num,
        })
    }
}

/// Target audience filter.
///
/// Besides its expression, an audience has a compact label such as
/// `All 25-50 IL 1-3,6` (see [`DemographicFilter::name`]); labels parse back
/// into filters through `FromStr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemographicFilter {
    sex: Option<Sex>,
    age: Option<AgeRange>,
    inc_level: Option<EnumSet<IncomeLevel>>,
    inc_group: Option<EnumSet<IncomeGroup>>,
    kids_age: [Option<EnumSet<KidsAge>>; KIDS_AGE_BINS],
    kids_num: Option<EnumSet<KidsNum>>,
}

impl DemographicFilter {
    /// Starts an empty set of options.
    pub fn builder() -> DemographicOptions {
        DemographicOptions::default()
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn age(&self) -> Option<AgeRange> {
        self.age
    }

    pub fn inc_level(&self) -> Option<&EnumSet<IncomeLevel>> {
        self.inc_level.as_ref()
    }

    pub fn inc_group(&self) -> Option<&EnumSet<IncomeGroup>> {
        self.inc_group.as_ref()
    }

    /// Children-age bin `bin` (1-based), if set.
    pub fn kids_age(&self, bin: usize) -> Option<&EnumSet<KidsAge>> {
        bin.checked_sub(1)
            .and_then(|i| self.kids_age.get(i))
            .and_then(Option::as_ref)
    }

    pub fn kids_num(&self) -> Option<&EnumSet<KidsNum>> {
        self.kids_num.as_ref()
    }

    /// The audience label, or `None` when neither sex nor age is set.
    pub fn name(&self) -> Option<String> {
        audience::encode(self)
    }
}

impl Expression for DemographicFilter {
    fn expr(&self) -> Option<String> {
        let sex = self.sex.and_then(|sex| expr::compile("sex", &[sex]));
        let head = [sex, self.age.expr(), self.inc_level.expr(), self.inc_group.expr()];
        let bins = self.kids_age.iter().map(Expression::expr);
        expr::all(head.into_iter().chain(bins).chain([self.kids_num.expr()]))
    }
}

impl FromStr for DemographicFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        audience::parse(s)
    }
}
