//! Tests for the audience label encoder and parser.

use super::*;
use crate::error::FilterError;
use crate::params::{IncomeGroup, IncomeLevel, KidsAge, KidsNum, Sex};

fn levels(numbers: &[u32]) -> Vec<IncomeLevel> {
    numbers
        .iter()
        .map(|&n| IncomeLevel::from_number(n).unwrap())
        .collect()
}

fn label(filter: crate::filters::DemographicOptions) -> Option<String> {
    encode(&filter.build().unwrap())
}

fn parsed_age(input: &str) -> (u32, u32) {
    parse(input).unwrap().age().unwrap().bounds()
}

fn parsed_levels(input: &str) -> Vec<u32> {
    parse(input)
        .unwrap()
        .inc_level()
        .unwrap()
        .iter()
        .map(IncomeLevel::number)
        .collect()
}

fn parsed_groups(input: &str) -> Vec<IncomeGroup> {
    parse(input).unwrap().inc_group().unwrap().values().to_vec()
}

// ==================== Encoder: Anchor ====================

#[test]
fn test_encode_unset() {
    assert_eq!(label(DemographicFilter::builder()), None);
}

#[test]
fn test_encode_income_without_anchor() {
    let opts = DemographicFilter::builder().inc_level(levels(&[1, 2]));
    assert_eq!(label(opts), None);
}

#[test]
fn test_encode_age_only() {
    assert_eq!(
        label(DemographicFilter::builder().age(25, 45)).as_deref(),
        Some("All 25-45")
    );
}

#[test]
fn test_encode_sex_and_age() {
    assert_eq!(
        label(DemographicFilter::builder().sex(Sex::Male).age(25, 45)).as_deref(),
        Some("M 25-45")
    );
    assert_eq!(
        label(DemographicFilter::builder().sex(Sex::Female).age(18, 99)).as_deref(),
        Some("W 18+")
    );
}

#[test]
fn test_encode_sex_without_age() {
    assert_eq!(label(DemographicFilter::builder().sex(Sex::Male)).as_deref(), Some("M"));
}

// ==================== Encoder: Income ====================

#[test]
fn test_encode_income_levels() {
    let cases: [(&[u32], &str); 6] = [
        (&[1], "All 25-50 IL 1"),
        (&[1, 2], "All 25-50 IL 1,2"),
        (&[1, 2, 3], "All 25-50 IL 1-3"),
        (&[1, 2, 3, 6], "All 25-50 IL 1-3,6"),
        (&[1, 2, 3, 4, 6], "All 25-50 IL 1-4,6"),
        (&[6, 5, 4, 3, 2, 1], "All 25-50 IL 1-6"),
    ];
    for (numbers, expected) in cases {
        let opts = DemographicFilter::builder()
            .age(25, 50)
            .inc_level(levels(numbers));
        assert_eq!(label(opts).as_deref(), Some(expected), "levels {numbers:?}");
    }
}

#[test]
fn test_encode_income_groups_keep_order() {
    let opts = DemographicFilter::builder()
        .age(25, 50)
        .inc_group([IncomeGroup::A, IncomeGroup::B, IncomeGroup::C]);
    assert_eq!(label(opts).as_deref(), Some("All 25-50 ABC"));

    let opts = DemographicFilter::builder()
        .age(25, 50)
        .inc_group([IncomeGroup::C, IncomeGroup::B, IncomeGroup::A]);
    assert_eq!(label(opts).as_deref(), Some("All 25-50 CBA"));
}

#[test]
fn test_encode_unclassified_group_dropped() {
    let opts = DemographicFilter::builder()
        .age(25, 50)
        .inc_group([IncomeGroup::Unclassified]);
    assert_eq!(label(opts).as_deref(), Some("All 25-50"));

    let opts = DemographicFilter::builder()
        .age(25, 50)
        .inc_group([IncomeGroup::B, IncomeGroup::Unclassified]);
    assert_eq!(label(opts).as_deref(), Some("All 25-50 B"));
}

// ==================== Encoder: Children ====================

#[test]
fn test_encode_single_kids_bins() {
    let cases = [
        (1, "All 18+ NO KIDS"),
        (2, "All 18+ KIDS AGE 0"),
        (3, "All 18+ KIDS AGE 1"),
        (4, "All 18+ KIDS AGE 2-3"),
        (5, "All 18+ KIDS AGE 4-6"),
        (6, "All 18+ KIDS AGE 7-11"),
        (7, "All 18+ KIDS AGE 12-15"),
    ];
    for (bin, expected) in cases {
        let opts = DemographicFilter::builder()
            .age(18, 99)
            .kids_age(bin, [KidsAge::Yes]);
        assert_eq!(label(opts).as_deref(), Some(expected), "bin {bin}");
    }
}

#[test]
fn test_encode_adjacent_kids_bins_merge() {
    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(2, [KidsAge::Yes])
        .kids_age(3, [KidsAge::Yes]);
    assert_eq!(label(opts).as_deref(), Some("All 18+ KIDS AGE 0-1"));

    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(4, [KidsAge::Yes])
        .kids_age(5, [KidsAge::Yes]);
    assert_eq!(label(opts).as_deref(), Some("All 18+ KIDS AGE 2-6"));

    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(4, [KidsAge::Yes])
        .kids_age(5, [KidsAge::Yes])
        .kids_age(6, [KidsAge::Yes]);
    assert_eq!(label(opts).as_deref(), Some("All 18+ KIDS AGE 2-11"));
}

// Bins 2 and 4 without 3: each run of adjacent bins gets its own term.
#[test]
fn test_encode_non_adjacent_kids_bins_one_term_per_run() {
    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(2, [KidsAge::Yes])
        .kids_age(4, [KidsAge::Yes])
        .kids_age(5, [KidsAge::Yes]);
    assert_eq!(
        label(opts).as_deref(),
        Some("All 18+ KIDS AGE 0 KIDS AGE 2-6")
    );
}

#[test]
fn test_encode_kids_bin_flagged_no_is_ignored() {
    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(4, [KidsAge::No]);
    assert_eq!(label(opts).as_deref(), Some("All 18+"));
}

#[test]
fn test_encode_kids_num() {
    let cases = [
        (KidsNum::NoKids, "All 18+ NO KIDS"),
        (KidsNum::OneKid, "All 18+ ONE KID"),
        (KidsNum::TwoKids, "All 18+ TWO KIDS"),
        (KidsNum::ThreeOrMoreKids, "All 18+ THREE+ KIDS"),
    ];
    for (count, expected) in cases {
        let opts = DemographicFilter::builder().age(18, 99).kids_num([count]);
        assert_eq!(label(opts).as_deref(), Some(expected));
    }
}

#[test]
fn test_encode_kids_bins_take_precedence_over_count() {
    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(5, [KidsAge::Yes])
        .kids_num([KidsNum::TwoKids]);
    assert_eq!(label(opts).as_deref(), Some("All 18+ KIDS AGE 4-6"));
}

#[test]
fn test_encode_kids_bin_flagged_no_still_suppresses_count() {
    let opts = DemographicFilter::builder()
        .age(18, 99)
        .kids_age(4, [KidsAge::No])
        .kids_num([KidsNum::TwoKids]);
    assert_eq!(label(opts).as_deref(), Some("All 18+"));
}

#[test]
fn test_encode_full_label() {
    let opts = DemographicFilter::builder()
        .sex(Sex::Female)
        .age(25, 50)
        .inc_level(levels(&[1, 2, 3, 6]))
        .inc_group([IncomeGroup::A, IncomeGroup::B])
        .kids_age(4, [KidsAge::Yes])
        .kids_age(5, [KidsAge::Yes]);
    assert_eq!(
        label(opts).as_deref(),
        Some("W 25-50 IL 1-3,6 AB KIDS AGE 2-6")
    );
}

// ==================== Parser: Anchor and Age ====================

#[test]
fn test_parse_base_audiences() {
    let cases = [
        ("M 18+", Some(Sex::Male), (18, 99)),
        ("M 30+", Some(Sex::Male), (30, 99)),
        ("M 25-45", Some(Sex::Male), (25, 45)),
        ("W 18+", Some(Sex::Female), (18, 99)),
        ("W 45+", Some(Sex::Female), (45, 99)),
        ("W 30-55", Some(Sex::Female), (30, 55)),
        ("All 18+", None, (18, 99)),
        ("All 25-30", None, (25, 30)),
        ("All 30+", None, (30, 99)),
    ];
    for (input, sex, age) in cases {
        let filter = parse(input).unwrap();
        assert_eq!(filter.sex(), sex, "{input}");
        assert_eq!(filter.age().map(|a| a.bounds()), Some(age), "{input}");
    }
}

#[test]
fn test_parse_case_insensitive() {
    assert_eq!(parse("m 18+").unwrap().sex(), Some(Sex::Male));
    assert_eq!(parsed_age("all 30-50"), (30, 50));
    assert_eq!(parsed_age("ALL 30-50"), (30, 50));
}

#[test]
fn test_parse_whitespace() {
    assert_eq!(parse(" W  45+ ").unwrap().sex(), Some(Sex::Female));
    assert_eq!(parsed_age(" W  45+ "), (45, 99));
    assert_eq!(parsed_age("all 30 - 50"), (30, 50));
    assert_eq!(parsed_age(" all 30 - 50"), (30, 50));
    assert_eq!(parsed_age("\tall\t30-50\n"), (30, 50));
}

#[test]
fn test_parse_sex_and_age_round_trip() {
    for (sex, min, max) in [
        (None, 18, 99),
        (Some(Sex::Male), 25, 45),
        (Some(Sex::Female), 4, 17),
        (None, 65, 99),
    ] {
        let mut opts = DemographicFilter::builder().age(min, max);
        if let Some(sex) = sex {
            opts = opts.sex(sex);
        }
        let filter = opts.build().unwrap();
        let reparsed = parse(&filter.name().unwrap()).unwrap();
        assert_eq!(reparsed, filter);
    }
}

// ==================== Parser: Income ====================

#[test]
fn test_parse_single_income_level() {
    for n in 1..=6 {
        assert_eq!(parsed_levels(&format!("All 18+ IL {n}")), vec![n]);
    }
}

#[test]
fn test_parse_income_level_ranges() {
    assert_eq!(parsed_levels("All 18+ IL 1-3"), vec![1, 2, 3]);
    assert_eq!(parsed_levels("All 18+ IL 2-4"), vec![2, 3, 4]);
    assert_eq!(parsed_levels("All 18+ IL 3-5"), vec![3, 4, 5]);
    assert_eq!(parsed_levels("All 18+ IL 4-6"), vec![4, 5, 6]);
    assert_eq!(parsed_levels("All 18+ IL 1-6"), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_parse_income_level_lists() {
    assert_eq!(parsed_levels("All 18+ IL 1,2"), vec![1, 2]);
    assert_eq!(parsed_levels("All 18+ IL 1,3"), vec![1, 3]);
    assert_eq!(parsed_levels("All 18+ IL 1,2,3"), vec![1, 2, 3]);
    assert_eq!(parsed_levels("All 18+ IL 1,2,3,6"), vec![1, 2, 3, 6]);
    assert_eq!(parsed_levels("All 18+ IL 1-4,6"), vec![1, 2, 3, 4, 6]);
}

#[test]
fn test_parse_income_levels_keep_text_order() {
    assert_eq!(parsed_levels("All 18+ IL 4,3,1,2,6"), vec![4, 3, 1, 2, 6]);
    assert_eq!(parsed_levels("All 18+ il 6, 1-2"), vec![6, 1, 2]);
}

#[test]
fn test_parse_income_groups() {
    use IncomeGroup::{A, B, C};
    let cases: [(&str, &[IncomeGroup]); 10] = [
        ("All 18+ A", &[A]),
        ("All 18+ B", &[B]),
        ("All 18+ C", &[C]),
        ("All 18+ AB", &[A, B]),
        ("All 18+ BA", &[B, A]),
        ("All 18+ AC", &[A, C]),
        ("All 18+ CB", &[C, B]),
        ("All 18+ ABC", &[A, B, C]),
        ("All 18+ ACB", &[A, C, B]),
        ("All 18+ BCA", &[B, C, A]),
    ];
    for (input, expected) in cases {
        assert_eq!(parsed_groups(input), expected, "{input}");
    }
}

#[test]
fn test_parse_levels_and_groups() {
    let filter = parse("W 25-50 IL 1-3,6 ab").unwrap();
    assert_eq!(filter.sex(), Some(Sex::Female));
    assert_eq!(filter.inc_level().map(|l| l.len()), Some(4));
    assert_eq!(
        filter.inc_group().map(|g| g.values().to_vec()),
        Some(vec![IncomeGroup::A, IncomeGroup::B])
    );
    assert_eq!(filter.name().as_deref(), Some("W 25-50 IL 1-3,6 AB"));
}

// ==================== Parser: Errors ====================

#[test]
fn test_parse_empty() {
    assert_eq!(parse(""), Err(FilterError::Parse(ParseError::EmptyInput)));
    assert_eq!(parse("   "), Err(FilterError::Parse(ParseError::EmptyInput)));
}

#[test]
fn test_parse_unknown_anchor() {
    let err = parse("Al 18+").unwrap_err();
    assert_eq!(
        err,
        FilterError::Parse(ParseError::UnknownSex {
            found: "AL".to_string(),
            suggestion: Some("All"),
        })
    );

    let err = parse("18+").unwrap_err();
    assert!(matches!(
        err,
        FilterError::Parse(ParseError::UnknownSex { suggestion: None, .. })
    ));
}

#[test]
fn test_parse_missing_age() {
    assert_eq!(
        parse("M").unwrap_err(),
        FilterError::Parse(ParseError::MissingAge { position: 1 })
    );
    assert_eq!(
        parse("M IL 1").unwrap_err(),
        FilterError::Parse(ParseError::MissingAge { position: 2 })
    );
}

#[test]
fn test_parse_incomplete_age() {
    assert_eq!(
        parse("All 25").unwrap_err(),
        FilterError::Parse(ParseError::UnexpectedEndOfInput)
    );
    assert_eq!(
        parse("All 25-").unwrap_err(),
        FilterError::Parse(ParseError::UnexpectedEndOfInput)
    );
    assert!(matches!(
        parse("All 25,45").unwrap_err(),
        FilterError::Parse(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn test_parse_inverted_age() {
    assert!(matches!(
        parse("All 45-25").unwrap_err(),
        FilterError::InvertedRange { field: "age", .. }
    ));
}

#[test]
fn test_parse_invalid_income_level() {
    assert!(matches!(
        parse("All 18+ IL 7").unwrap_err(),
        FilterError::InvalidMember { field: "incLevel", .. }
    ));
    assert!(matches!(
        parse("All 18+ IL 3-1").unwrap_err(),
        FilterError::InvertedRange { field: "incLevel", .. }
    ));
    assert!(matches!(
        parse("All 18+ IL 1,1").unwrap_err(),
        FilterError::DuplicateValue { field: "incLevel", .. }
    ));
    assert_eq!(
        parse("All 18+ IL").unwrap_err(),
        FilterError::Parse(ParseError::UnexpectedEndOfInput)
    );
}

#[test]
fn test_parse_duplicate_group_letter() {
    assert!(matches!(
        parse("All 18+ AA").unwrap_err(),
        FilterError::DuplicateValue {
            field: "incomeGroupRussia",
            ..
        }
    ));
}

#[test]
fn test_parse_trailing_tokens() {
    assert_eq!(
        parse("All 18+ ABD").unwrap_err(),
        FilterError::Parse(ParseError::unexpected_token("ABD", 8))
    );
    assert_eq!(
        parse("All 18+ A IL 1").unwrap_err(),
        FilterError::Parse(ParseError::unexpected_token("IL", 10))
    );
}

#[test]
fn test_parse_unexpected_character() {
    assert!(matches!(
        parse("All 18+ IL 1;2").unwrap_err(),
        FilterError::Parse(ParseError::UnexpectedCharacter { character: ';', .. })
    ));
}

// Children terms are written by the encoder but not read back.
#[test]
fn test_parse_rejects_kids_age_terms() {
    assert_eq!(
        parse("All 18+ KIDS AGE 2-6").unwrap_err(),
        FilterError::Parse(ParseError::unexpected_token("KIDS", 8))
    );
    assert!(parse("All 18+ NO KIDS").is_err());
}

#[test]
fn test_parse_rejects_kids_num_terms() {
    assert!(parse("All 18+ ONE KID").is_err());
    assert!(parse("All 18+ THREE+ KIDS").is_err());
}

#[test]
fn test_from_str() {
    let filter: DemographicFilter = "M 25-45".parse().unwrap();
    assert_eq!(filter.name().as_deref(), Some("M 25-45"));
}
