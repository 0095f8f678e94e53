//! Byte cursor over SDP text
//!
//! The lexer works one line at a time. A line starts with a two byte type key
//! (`<letter>=`), followed by either whitespace separated fields or an
//! opaque value that runs to the end of the line. CR, LF and CRLF are all
//! accepted as line terminators.
//!
//! Readers distinguish "nothing left on this line" ([`Field::EndOfLine`]) from
//! "nothing left at all" ([`Field::EndOfInput`]) so that the driver can tell a
//! short line from a truncated document.

use std::str::FromStr;

use crate::error::{parse_uint, FieldError};
use crate::parser::grammar::LineKey;

/// Result of reading one whitespace separated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Token(&'a str),
    EndOfLine,
    EndOfInput,
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

fn is_newline(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// 1-based number of the line under the cursor
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    /// Step back one byte. Never moves before the start of the input.
    pub fn unread_byte(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Consume one line terminator (CR, LF or CRLF) if the cursor is on one.
    fn consume_newline(&mut self) -> bool {
        match self.read_byte() {
            Some(b'\n') => {
                self.line += 1;
                true
            }
            Some(b'\r') => {
                // bare CR: give back the first byte of the next line
                if let Some(b) = self.read_byte() {
                    if b != b'\n' {
                        self.unread_byte();
                    }
                }
                self.line += 1;
                true
            }
            Some(_) => {
                self.unread_byte();
                false
            }
            None => false,
        }
    }

    fn skip_blanks(&mut self) {
        while self.peek_byte().is_some_and(is_blank) {
            self.pos += 1;
        }
    }

    /// Read the `<letter>=` key that opens the next line.
    ///
    /// Empty lines are skipped. Returns `Ok(None)` once the input is
    /// exhausted.
    pub fn read_key(&mut self) -> Result<Option<LineKey>, FieldError> {
        while self.peek_byte().is_some_and(is_newline) {
            self.consume_newline();
        }
        let Some(letter) = self.read_byte() else {
            return Ok(None);
        };
        if !letter.is_ascii_lowercase() || self.read_byte() != Some(b'=') {
            let text = self.rest_of_line_from(self.pos.saturating_sub(2));
            return Err(FieldError::syntax(format!(
                "malformed line '{text}': expected '<type>=<value>'"
            )));
        }
        LineKey::from_byte(letter)
            .map(Some)
            .ok_or_else(|| FieldError::syntax(format!("unknown line type '{}='", letter as char)))
    }

    fn rest_of_line_from(&self, start: usize) -> &'a str {
        let bytes = self.input.as_bytes();
        let start = start.min(bytes.len());
        let end = bytes[start..]
            .iter()
            .position(|&b| is_newline(b))
            .map_or(bytes.len(), |n| start + n);
        &self.input[start..end]
    }

    /// Read the next whitespace separated token on the current line
    pub fn read_field(&mut self) -> Field<'a> {
        self.skip_blanks();
        match self.peek_byte() {
            None => Field::EndOfInput,
            Some(b) if is_newline(b) => Field::EndOfLine,
            Some(_) => {
                let start = self.pos;
                while self.peek_byte().is_some_and(|b| !is_blank(b) && !is_newline(b)) {
                    self.pos += 1;
                }
                Field::Token(&self.input[start..self.pos])
            }
        }
    }

    /// Read a mandatory token, naming it in the error if it is missing
    pub fn expect_field(&mut self, name: &'static str) -> Result<&'a str, FieldError> {
        match self.read_field() {
            Field::Token(token) => Ok(token),
            Field::EndOfLine => Err(FieldError::syntax(format!("missing {name}"))),
            Field::EndOfInput => Err(FieldError::Truncated(name)),
        }
    }

    /// Read a mandatory unsigned integer field
    pub fn read_uint<T>(&mut self, name: &'static str) -> Result<T, FieldError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        let token = self.expect_field(name)?;
        parse_uint(name, token)
    }

    /// Read everything up to (not including) the line terminator
    pub fn read_line(&mut self) -> &'a str {
        let text = self.rest_of_line_from(self.pos);
        self.pos += text.len();
        text
    }

    /// Finish the current line.
    ///
    /// Trailing blanks are allowed; any other leftover text means the line
    /// carried more fields than its type permits.
    pub fn next_line(&mut self) -> Result<(), FieldError> {
        self.skip_blanks();
        if self.at_end() || self.consume_newline() {
            return Ok(());
        }
        let extra = self.rest_of_line_from(self.pos);
        Err(FieldError::syntax(format!("unexpected trailing data '{extra}'")))
    }
}
