//! Lexer (tokenizer) for audience labels.

use std::iter::Peekable;
use std::str::Chars;

use super::error::ParseError;

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: LabelToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in an audience label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelToken {
    /// A run of letters, upper-cased (`ALL`, `IL`, `ABC`).
    Word(String),
    /// A run of digits.
    Number(u32),
    /// `+`
    Plus,
    /// `-`
    Dash,
    /// `,`
    Comma,
}

impl LabelToken {
    /// The token as it would be written in a label.
    pub fn text(&self) -> String {
        match self {
            LabelToken::Word(word) => word.clone(),
            LabelToken::Number(n) => n.to_string(),
            LabelToken::Plus => "+".to_string(),
            LabelToken::Dash => "-".to_string(),
            LabelToken::Comma => ",".to_string(),
        }
    }
}

/// Lexer for tokenizing audience labels.
///
/// Whitespace separates tokens but is otherwise ignored, so `30 - 50` and
/// `30-50` produce the same tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads characters while `accept` holds.
    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(&c) = self.peek() {
            if !accept(c) {
                break;
            }
            text.push(c);
            self.next_char();
        }
        text
    }

    /// Returns the next token, `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedCharacter` for a character that starts
    /// no token and `ParseError::NumberOutOfRange` for an oversized number.
    pub fn next_token(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        self.skip_whitespace();

        let Some(&c) = self.peek() else {
            return Ok(None);
        };
        let position = self.position;

        let token = match c {
            '+' => {
                self.next_char();
                LabelToken::Plus
            }
            '-' => {
                self.next_char();
                LabelToken::Dash
            }
            ',' => {
                self.next_char();
                LabelToken::Comma
            }
            _ if c.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                let n = digits
                    .parse::<u32>()
                    .map_err(|_| ParseError::NumberOutOfRange { value: digits })?;
                LabelToken::Number(n)
            }
            _ if c.is_alphabetic() => {
                LabelToken::Word(self.read_while(char::is_alphabetic).to_uppercase())
            }
            _ => {
                return Err(ParseError::UnexpectedCharacter {
                    character: c,
                    position,
                })
            }
        };

        Ok(Some(PositionedToken { token, position }))
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Lexer::next_token`].
    pub fn tokenize(mut self) -> Result<Vec<PositionedToken>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<LabelToken> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    fn word(w: &str) -> LabelToken {
        LabelToken::Word(w.to_string())
    }

    #[test]
    fn test_tokenize_open_age() {
        assert_eq!(
            kinds("All 18+"),
            vec![word("ALL"), LabelToken::Number(18), LabelToken::Plus]
        );
    }

    #[test]
    fn test_tokenize_spaced_dash() {
        assert_eq!(kinds("all 30 - 50"), kinds("ALL 30-50"));
    }

    #[test]
    fn test_tokenize_income_levels() {
        assert_eq!(
            kinds("IL 1-3,6"),
            vec![
                word("IL"),
                LabelToken::Number(1),
                LabelToken::Dash,
                LabelToken::Number(3),
                LabelToken::Comma,
                LabelToken::Number(6),
            ]
        );
    }

    #[test]
    fn test_tokenize_letters_upper_cased() {
        assert_eq!(kinds("m 25-45 abc"), kinds("M 25-45 ABC"));
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("  W 45+").tokenize().unwrap();
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens[1].position, 4);
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("All 18+ @").tokenize().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedCharacter {
                character: '@',
                position: 8
            }
        );
    }

    #[test]
    fn test_number_out_of_range() {
        let err = Lexer::new("All 99999999999-1").tokenize().unwrap_err();
        assert!(matches!(err, ParseError::NumberOutOfRange { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(Lexer::new("   ").tokenize().unwrap().is_empty());
    }
}
