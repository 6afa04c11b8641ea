//! Error types for the audience label parser.

use thiserror::Error;

/// Errors raised while reading an audience label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The label is empty or whitespace only.
    #[error("audience label is empty")]
    EmptyInput,

    /// The label does not start with `M`, `W` or `All`.
    #[error("{}", unknown_sex_message(.found, .suggestion))]
    UnknownSex {
        /// The word found in the anchor position.
        found: String,
        /// The closest anchor word, when one is close enough.
        suggestion: Option<&'static str>,
    },

    /// The anchor is not followed by `N+` or `N-M`.
    #[error("expected an age such as 18+ or 25-45 at position {position}")]
    MissingAge {
        /// Byte offset where the age was expected.
        position: usize,
    },

    /// A token appears where the grammar does not allow it.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The token text.
        token: String,
        /// Byte offset of the token.
        position: usize,
    },

    /// A character that starts no token.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// The label ends in the middle of a term.
    #[error("unexpected end of audience label")]
    UnexpectedEndOfInput,

    /// A number does not fit the allowed range.
    #[error("number out of range: {value}")]
    NumberOutOfRange {
        /// The number as written.
        value: String,
    },
}

fn unknown_sex_message(found: &str, suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(
            "unknown audience anchor '{found}' (expected M, W or All). Did you mean '{s}'?"
        ),
        None => format!("unknown audience anchor '{found}' (expected M, W or All)"),
    }
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        ParseError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }
}
