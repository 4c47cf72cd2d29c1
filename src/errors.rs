//! General error types for the parser

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::coords::Coords;

/// Global result type used throughout the parser
pub type ParserResult<T> = Result<T, ParserError>;

/// The flat error taxonomy reported by a [crate::parser::Parser] through `last_error`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ErrorCode {
    /// No error has been encountered
    #[default]
    Success,
    /// A required symbol was missing or malformed
    Unexpected,
    /// The input ran out whilst a construct was still open
    EndOfInput,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "success"),
            ErrorCode::Unexpected => write!(f, "unexpected"),
            ErrorCode::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Details {
    #[error("end of input reached before an object was found")]
    ObjectExpected,
    #[error("end of input reached before an array was found")]
    ArrayExpected,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unrecognised keyword '{0}'")]
    UnknownKeyword(String),
    #[error("expected an object key, found '{0}'")]
    KeyExpected(char),
    #[error("expected a colon, found '{0}'")]
    ColonExpected(char),
    #[error("expected a comma, found '{0}'")]
    CommaExpected(char),
    #[error("end of input reached whilst a value was expected")]
    ValueExpected,
    #[error("end of input reached inside a string literal")]
    UnterminatedString,
    #[error("end of input reached inside an array")]
    UnterminatedArray,
    #[error("end of input reached inside an object")]
    UnterminatedObject,
    /// Raised before parsing starts, when the input bytes can't be decoded. Holds the byte
    /// offset of the first bad sequence.
    #[error("invalid byte sequence at byte offset {0}")]
    InvalidEncoding(usize),
}

impl Details {
    /// The [ErrorCode] this failure is reported under
    pub fn code(&self) -> ErrorCode {
        match self {
            Details::UnexpectedCharacter(_)
            | Details::UnknownKeyword(_)
            | Details::KeyExpected(_)
            | Details::ColonExpected(_)
            | Details::CommaExpected(_)
            | Details::InvalidEncoding(_) => ErrorCode::Unexpected,
            Details::ObjectExpected
            | Details::ArrayExpected
            | Details::ValueExpected
            | Details::UnterminatedString
            | Details::UnterminatedArray
            | Details::UnterminatedObject => ErrorCode::EndOfInput,
        }
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{details} at {coords}")]
pub struct ParserError {
    /// What went wrong
    pub details: Details,
    /// Where it went wrong
    pub coords: Coords,
}

impl ParserError {
    pub fn code(&self) -> ErrorCode {
        self.details.code()
    }

    pub fn line(&self) -> usize {
        self.coords.line
    }

    pub fn column(&self) -> usize {
        self.coords.column
    }
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::ParserError {
            details: $details,
            coords: $coords,
        })
    };
}
