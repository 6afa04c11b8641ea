//! Parameters shared by every task type.

use super::{api_enum, ApiEnum};

api_enum! {
    /// Day of the research week.
    pub enum Weekday: Int {
        Monday = 1,
        Tuesday = 2,
        Wednesday = 3,
        Thursday = 4,
        Friday = 5,
        Saturday = 6,
        Sunday = 7,
    }
}

api_enum! {
    /// Kind of research day.
    pub enum DayType: Text {
        Weekday = "W",
        Weekend = "E",
        Holiday = "H",
        MourningDay = "F",
    }
}

api_enum! {
    /// Where the viewing took place.
    pub enum Location: Int {
        Home = 1,
        Dacha = 2,
        OutOfHome = 4,
    }
}

api_enum! {
    /// Respondent sex.
    pub enum Sex: Int {
        Male = 1,
        Female = 2,
    }
}

api_enum! {
    /// Household income level, 1 (lowest) to 6 (highest).
    pub enum IncomeLevel: Int {
        L1 = 1,
        L2 = 2,
        L3 = 3,
        L4 = 4,
        L5 = 5,
        L6 = 6,
    }
}

api_enum! {
    /// Income group (Russia classification).
    pub enum IncomeGroup: Int {
        A = 1,
        B = 2,
        C = 3,
        /// Respondents outside the A/B/C classification.
        Unclassified = 4,
    }
}

api_enum! {
    /// Flag value for one children-age bin.
    pub enum KidsAge: Int {
        Yes = 1,
        No = 2,
    }
}

api_enum! {
    /// Number of children in the household.
    pub enum KidsNum: Int {
        NoKids = 1,
        OneKid = 2,
        TwoKids = 3,
        ThreeOrMoreKids = 4,
    }
}

api_enum! {
    /// Thematic category of a TV company.
    pub enum TvThematicId: Int {
        Federal = 1,
        News = 4,
        Sport = 5,
        Music = 6,
        Children = 7,
        Entertaining = 8,
        Movies = 11,
        Advertising = 19,
    }
}

api_enum! {
    /// TV network.
    pub enum TvNetId: Int {
        PervyKanal = 1,
        Rossiya1 = 2,
        Ntv = 4,
        RenTv = 60,
        Sts = 83,
        AdChannels = 100,
        Domashniy = 257,
    }
}

api_enum! {
    /// Measurement region.
    pub enum RegionId: Int {
        Moscow = 1,
        SaintPetersburg = 2,
        Yekaterinburg = 4,
        Novosibirsk = 5,
    }
}

api_enum! {
    /// Holding that owns the TV company.
    pub enum TvCompanyHoldingId: Int {
        Viasat = 1000014,
        GazpromMedia = 1000042,
        NationalMediaGroup = 1000052,
    }
}

api_enum! {
    /// Media holding that owns the TV company.
    pub enum TvCompanyMediaHoldingId: Int {
        Media1 = 1,
        Viasat = 3,
        GazpromMedia = 8,
    }
}

/// Number of children-age bins (`kidsAge1` .. `kidsAge7`).
pub const KIDS_AGE_BINS: usize = 7;

/// Children ages covered by bins 2..=7. Bin 1 means "no children".
const KIDS_AGE_SPANS: [(u32, u32); KIDS_AGE_BINS - 1] =
    [(0, 0), (1, 1), (2, 3), (4, 6), (7, 11), (12, 15)];

/// Inclusive age span of children-age bin `bin` (1-based).
///
/// Returns `None` for bin 1, which has no span, and for bins out of range.
pub fn kids_age_span(bin: usize) -> Option<(u32, u32)> {
    bin.checked_sub(2)
        .and_then(|i| KIDS_AGE_SPANS.get(i))
        .copied()
}

impl Sex {
    /// Anchor token used in audience labels.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "W",
        }
    }
}

impl IncomeLevel {
    /// The level as a number in `1..=6`.
    pub fn number(self) -> u32 {
        match self {
            IncomeLevel::L1 => 1,
            IncomeLevel::L2 => 2,
            IncomeLevel::L3 => 3,
            IncomeLevel::L4 => 4,
            IncomeLevel::L5 => 5,
            IncomeLevel::L6 => 6,
        }
    }

    /// Looks up a level by its number.
    pub fn from_number(n: u32) -> Option<Self> {
        Self::from_code(i64::from(n))
    }
}

impl IncomeGroup {
    /// Letter used in audience labels; the unclassified group has none.
    pub fn letter(self) -> Option<char> {
        match self {
            IncomeGroup::A => Some('A'),
            IncomeGroup::B => Some('B'),
            IncomeGroup::C => Some('C'),
            IncomeGroup::Unclassified => None,
        }
    }

    /// Inverse of [`IncomeGroup::letter`], case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(IncomeGroup::A),
            'B' => Some(IncomeGroup::B),
            'C' => Some(IncomeGroup::C),
            _ => None,
        }
    }
}

impl KidsNum {
    /// Label token for this children count.
    pub fn label(self) -> &'static str {
        match self {
            KidsNum::NoKids => "NO KIDS",
            KidsNum::OneKid => "ONE KID",
            KidsNum::TwoKids => "TWO KIDS",
            KidsNum::ThreeOrMoreKids => "THREE+ KIDS",
        }
    }
}
