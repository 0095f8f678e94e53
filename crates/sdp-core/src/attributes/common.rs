//! Common parsing utilities for SDP attributes
//!
//! Reusable nom parsers shared by the individual attribute decoders.

use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::digit1,
    combinator::{all_consuming, map_res},
    IResult,
};

use crate::error::FieldError;

/// RFC 8866 `token-char`
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`{|}~".contains(c)
}

/// RFC 8839 `ice-char`
pub fn is_ice_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Parses a token: one or more token characters
pub fn token(input: &str) -> IResult<&str, &str> {
    take_while1(is_token_char)(input)
}

/// Parses a run of non-whitespace characters
pub fn non_ws(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_ascii_whitespace())(input)
}

/// Parses an unsigned integer into `T`, failing on overflow
pub fn integer<T: FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, |s: &str| s.parse::<T>())(input)
}

pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Run `parser` over the whole of `input`.
///
/// Leftover input counts as a failure; the error names the attribute and
/// echoes the offending value.
pub fn parse_all<'a, T, F>(attribute: &str, input: &'a str, parser: F) -> Result<T, FieldError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    all_consuming(parser)(input)
        .map(|(_, value)| value)
        .map_err(|_| FieldError::syntax(format!("invalid a={attribute} value '{input}'")))
}

/// Accept `value` if it is a single token, naming the attribute otherwise
pub fn expect_token(attribute: &str, value: &str) -> Result<String, FieldError> {
    if is_token(value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::syntax(format!("invalid a={attribute} value '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token() {
        assert_eq!(token("BUNDLE 0 1"), Ok((" 0 1", "BUNDLE")));
        assert!(token(" x").is_err());
        assert!(is_token("sha-256"));
        assert!(!is_token("a b"));
        assert!(!is_token(""));
    }

    #[test]
    fn test_integer_overflow_fails() {
        assert_eq!(integer::<u8>("127 rest"), Ok((" rest", 127)));
        assert!(integer::<u8>("256").is_err());
    }

    #[test]
    fn test_parse_all_rejects_leftovers() {
        assert_eq!(parse_all("ptime", "20", integer::<u32>), Ok(20));
        let err = parse_all("ptime", "20ms", integer::<u32>).unwrap_err();
        assert_eq!(err.to_string(), "invalid a=ptime value '20ms'");
    }
}
