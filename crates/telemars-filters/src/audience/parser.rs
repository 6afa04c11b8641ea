//! Recursive descent parser for audience labels.

use tracing::trace;

use super::error::ParseError;
use super::label::INCOME_LEVEL_PREFIX;
use super::lexer::{LabelToken, Lexer, PositionedToken};
use crate::error::{FilterError, FilterResult};
use crate::filters::{DemographicFilter, DemographicOptions};
use crate::params::{IncomeGroup, IncomeLevel, Sex};
use crate::value::OPEN_AGE_MAX;

/// Anchor words offered as suggestions for a misspelled anchor.
const ANCHORS: [&str; 3] = ["M", "W", "All"];

/// Maximum edit distance for a "did you mean" suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Parser for audience labels.
///
/// # Grammar
///
/// ```text
/// audience     ::= anchor age income_level? income_group?
/// anchor       ::= "M" | "W" | "ALL"
/// age          ::= INT "+" | INT "-" INT
/// income_level ::= "IL" level ("," level)*
/// level        ::= INT | INT "-" INT
/// income_group ::= ("A" | "B" | "C")+
/// ```
///
/// Matching is case-insensitive and whitespace between tokens is ignored.
/// Children terms (`NO KIDS`, `KIDS AGE 2-6`, `ONE KID`) are not part of
/// the grammar and are rejected as unexpected tokens.
///
/// # Example
///
/// ```
/// use telemars_filters::audience::AudienceParser;
///
/// let filter = AudienceParser::parse("all 30 - 50 IL 1-3,6")?;
/// assert_eq!(filter.age().map(|age| age.bounds()), Some((30, 50)));
/// assert_eq!(filter.inc_level().map(|levels| levels.len()), Some(4));
/// # Ok::<(), telemars_filters::FilterError>(())
/// ```
pub struct AudienceParser<'a> {
    input: &'a str,
    tokens: Vec<PositionedToken>,
    position: usize,
}

impl<'a> AudienceParser<'a> {
    /// Parses an audience label into a filter.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Parse` when the label does not follow the
    /// grammar, and the validation errors of [`DemographicOptions::build`]
    /// when it does but the values are invalid (income level 7, `IL 3-1`,
    /// a repeated group).
    pub fn parse(input: &'a str) -> FilterResult<DemographicFilter> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let tokens = Lexer::new(input).tokenize()?;
        trace!(input, tokens = tokens.len(), "parsing audience label");

        let mut parser = Self {
            input,
            tokens,
            position: 0,
        };
        let options = parser.parse_audience()?;

        if let Some(remaining) = parser.peek() {
            return Err(
                ParseError::unexpected_token(remaining.token.text(), remaining.position).into(),
            );
        }

        options.build()
    }

    fn peek(&self) -> Option<&PositionedToken> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<PositionedToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &LabelToken) -> bool {
        self.peek().map(|t| &t.token) == Some(expected)
    }

    /// Parses `anchor age income_level? income_group?`.
    fn parse_audience(&mut self) -> FilterResult<DemographicOptions> {
        let sex = self.parse_anchor()?;
        let (min, max) = self.parse_age()?;
        trace!(?sex, min, max, "parsed audience anchor");

        let mut options = DemographicOptions::default().age(min, max);
        if let Some(sex) = sex {
            options = options.sex(sex);
        }

        if self.check(&LabelToken::Word(INCOME_LEVEL_PREFIX.to_string())) {
            self.advance();
            options = options.inc_level(self.parse_levels()?);
        }

        if let Some(groups) = self.parse_groups() {
            options = options.inc_group(groups);
        }

        Ok(options)
    }

    /// Parses `"M" | "W" | "ALL"`. `ALL` leaves sex unset.
    fn parse_anchor(&mut self) -> FilterResult<Option<Sex>> {
        let Some(token) = self.advance() else {
            return Err(ParseError::EmptyInput.into());
        };

        match token.token {
            LabelToken::Word(word) => match word.as_str() {
                "M" => Ok(Some(Sex::Male)),
                "W" => Ok(Some(Sex::Female)),
                "ALL" => Ok(None),
                _ => {
                    let suggestion = suggest_anchor(&word);
                    Err(ParseError::UnknownSex {
                        found: word,
                        suggestion,
                    }
                    .into())
                }
            },
            other => Err(ParseError::UnknownSex {
                found: other.text(),
                suggestion: None,
            }
            .into()),
        }
    }

    /// Parses `INT "+" | INT "-" INT` into `(min, max)`.
    fn parse_age(&mut self) -> FilterResult<(u32, u32)> {
        let min = match self.advance() {
            Some(PositionedToken {
                token: LabelToken::Number(n),
                ..
            }) => n,
            Some(token) => {
                return Err(ParseError::MissingAge {
                    position: token.position,
                }
                .into())
            }
            None => {
                return Err(ParseError::MissingAge {
                    position: self.input.len(),
                }
                .into())
            }
        };

        match self.advance() {
            Some(PositionedToken {
                token: LabelToken::Plus,
                ..
            }) => Ok((min, OPEN_AGE_MAX)),
            Some(PositionedToken {
                token: LabelToken::Dash,
                ..
            }) => Ok((min, self.expect_number()?)),
            Some(token) => {
                Err(ParseError::unexpected_token(token.token.text(), token.position).into())
            }
            None => Err(ParseError::UnexpectedEndOfInput.into()),
        }
    }

    /// Parses `level ("," level)*`. Ranges expand in ascending order; the
    /// levels keep the order they appear in.
    fn parse_levels(&mut self) -> FilterResult<Vec<IncomeLevel>> {
        let mut levels = Vec::new();
        loop {
            let first = self.expect_number()?;
            if self.check(&LabelToken::Dash) {
                self.advance();
                let last = self.expect_number()?;
                if first > last {
                    return Err(FilterError::inverted("incLevel", first, last));
                }
                for n in first..=last {
                    levels.push(self.income_level(n)?);
                }
            } else {
                levels.push(self.income_level(first)?);
            }

            if !self.check(&LabelToken::Comma) {
                break;
            }
            self.advance();
        }
        Ok(levels)
    }

    /// Parses a run of group letters such as `CBA`. A word with any other
    /// letter is left for the caller to reject.
    fn parse_groups(&mut self) -> Option<Vec<IncomeGroup>> {
        let LabelToken::Word(word) = &self.peek()?.token else {
            return None;
        };
        let groups = word
            .chars()
            .map(IncomeGroup::from_letter)
            .collect::<Option<Vec<_>>>()?;
        self.advance();
        Some(groups)
    }

    fn expect_number(&mut self) -> FilterResult<u32> {
        match self.advance() {
            Some(PositionedToken {
                token: LabelToken::Number(n),
                ..
            }) => Ok(n),
            Some(token) => {
                Err(ParseError::unexpected_token(token.token.text(), token.position).into())
            }
            None => Err(ParseError::UnexpectedEndOfInput.into()),
        }
    }

    fn income_level(&self, n: u32) -> FilterResult<IncomeLevel> {
        IncomeLevel::from_number(n).ok_or_else(|| {
            FilterError::invalid_member("incLevel", n.to_string(), self.input.trim())
        })
    }
}

/// Finds the anchor closest to `word`, if any is close enough.
fn suggest_anchor(word: &str) -> Option<&'static str> {
    ANCHORS
        .iter()
        .map(|anchor| (*anchor, strsim::levenshtein(word, &anchor.to_uppercase())))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(anchor, _)| anchor)
}
