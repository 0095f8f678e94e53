//! SDP Format Parameters (fmtp) Attribute Parser
//!
//! Format: a=fmtp:<format> <format specific parameters>
//!
//! The parameter string is codec specific and kept verbatim; [`Fmtp::parameters`]
//! offers the common `key=value;key=value` reading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::is_token;
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fmtp {
    pub format: String,
    pub parameters: String,
}

impl Fmtp {
    /// Iterate `key[=value]` pairs of a semicolon separated parameter list
    pub fn parameters(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.parameters
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| match p.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (p, None),
            })
    }

    /// Value of a single parameter, e.g. `profile-level-id`
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value)
    }
}

impl FromStr for Fmtp {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::syntax(format!("invalid a=fmtp value '{s}'"));
        let (format, parameters) = s.split_once(' ').ok_or_else(invalid)?;
        if !is_token(format) || parameters.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Fmtp {
            format: format.to_string(),
            parameters: parameters.to_string(),
        })
    }
}

impl fmt::Display for Fmtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format, self.parameters)
    }
}
