use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use thiserror::Error;

use crate::attributes::AttributeLevel;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding SDP text or querying a decoded document.
///
/// Every decode error carries the 1-based line number of the offending line.
/// A parse either yields a complete [`SessionDescription`](crate::SessionDescription)
/// or one of these errors; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed line structure, wrong field count or a token outside its allow-list
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A known line type that the grammar does not permit at this point
    #[error("line {line}: '{key}=' line not allowed after {state}")]
    UnexpectedLine {
        line: usize,
        key: char,
        state: &'static str,
    },

    /// A numeric field that is not a number or does not fit its width
    #[error("line {line}: invalid {field} '{value}': {reason}")]
    Numeric {
        line: usize,
        field: &'static str,
        value: String,
        reason: NumericReason,
    },

    /// Attribute name outside the registry (strict policy only)
    #[error("line {line}: unsupported attribute 'a={name}'")]
    UnsupportedAttribute { line: usize, name: String },

    /// Registered attribute used at a level where it is not allowed.
    ///
    /// `line` is 0 when the attribute was added programmatically.
    #[error("{}: attribute 'a={name}' is not allowed at {level} level", position(.line))]
    AttributeScope {
        line: usize,
        name: String,
        level: AttributeLevel,
    },

    /// Input ended before a mandatory line or field was supplied
    #[error("line {line}: input ended before {expected}")]
    Truncated { line: usize, expected: &'static str },

    /// Input is not UTF-8
    #[error("line {line}: input is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    /// No rtpmap/fmtp/rtcp-fb line mentions the payload type
    #[error("no codec found for payload type {0}")]
    PayloadTypeNotFound(u8),

    /// No payload type carries a codec matching the request
    #[error("no payload type matches the requested codec")]
    CodecNotFound,
}

fn position(line: &usize) -> String {
    if *line == 0 {
        "programmatic update".to_string()
    } else {
        format!("line {line}")
    }
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Numeric,
    UnsupportedAttribute,
    Truncated,
    Lookup,
}

impl Error {
    /// Which broad class of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. } | Error::UnexpectedLine { .. } | Error::InvalidUtf8 { .. } => {
                ErrorKind::Syntax
            }
            Error::Numeric { .. } => ErrorKind::Numeric,
            Error::UnsupportedAttribute { .. } | Error::AttributeScope { .. } => {
                ErrorKind::UnsupportedAttribute
            }
            Error::Truncated { .. } => ErrorKind::Truncated,
            Error::PayloadTypeNotFound(_) | Error::CodecNotFound => ErrorKind::Lookup,
        }
    }

    /// Line number the error refers to, if it came from decoding input
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::UnexpectedLine { line, .. }
            | Error::Numeric { line, .. }
            | Error::UnsupportedAttribute { line, .. }
            | Error::Truncated { line, .. }
            | Error::InvalidUtf8 { line } => Some(*line),
            Error::AttributeScope { line, .. } => (*line != 0).then_some(*line),
            Error::PayloadTypeNotFound(_) | Error::CodecNotFound => None,
        }
    }
}

/// Why a numeric field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericReason {
    /// Empty or contains a non-digit character
    NotANumber,
    /// Digits only, but too large for the field
    Overflow,
}

impl fmt::Display for NumericReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericReason::NotANumber => f.write_str("not a number"),
            NumericReason::Overflow => f.write_str("out of range"),
        }
    }
}

/// Error raised by a single field or attribute decoder.
///
/// Decoders do not know where they are in the document; the line driver
/// turns a `FieldError` into a positioned [`Error`] with [`FieldError::at`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0}")]
    Syntax(String),

    #[error("invalid {field} '{value}': {reason}")]
    Numeric {
        field: &'static str,
        value: String,
        reason: NumericReason,
    },

    #[error("unsupported attribute 'a={0}'")]
    UnsupportedAttribute(String),

    #[error("attribute 'a={name}' is not allowed at {level} level")]
    NotAllowed { name: String, level: AttributeLevel },

    #[error("input ended before {0}")]
    Truncated(&'static str),
}

impl FieldError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        FieldError::Syntax(message.into())
    }

    /// Attach a line number
    pub fn at(self, line: usize) -> Error {
        match self {
            FieldError::Syntax(message) => Error::Syntax { line, message },
            FieldError::Numeric {
                field,
                value,
                reason,
            } => Error::Numeric {
                line,
                field,
                value,
                reason,
            },
            FieldError::UnsupportedAttribute(name) => Error::UnsupportedAttribute { line, name },
            FieldError::NotAllowed { name, level } => Error::AttributeScope { line, name, level },
            FieldError::Truncated(expected) => Error::Truncated { line, expected },
        }
    }
}

/// Parse an unsigned decimal field.
///
/// Only ASCII digits are accepted (no sign, no whitespace); anything else is
/// [`NumericReason::NotANumber`], a digit string that does not fit `T` is
/// [`NumericReason::Overflow`].
pub(crate) fn parse_uint<T>(field: &'static str, value: &str) -> std::result::Result<T, FieldError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let numeric = |reason| FieldError::Numeric {
        field,
        value: value.to_string(),
        reason,
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(numeric(NumericReason::NotANumber));
    }
    value.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => numeric(NumericReason::Overflow),
        _ => numeric(NumericReason::NotANumber),
    })
}
