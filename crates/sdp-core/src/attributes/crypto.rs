//! SDES crypto attribute (RFC 4568)
//!
//! Format: a=crypto:<tag> <crypto-suite> <key-params> [<session-params>]
//!
//! Key material is carried as text; it is not decoded or validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::is_token;
use crate::error::{parse_uint, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crypto {
    pub tag: u32,
    /// e.g. `AES_CM_128_HMAC_SHA1_80`
    pub suite: String,
    /// `inline:<key||salt>[|lifetime][|MKI:length]`, possibly several joined by `;`
    pub key_params: String,
    pub session_params: Vec<String>,
}

impl Crypto {
    /// Individual `<method>:<info>` key parameters
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key_params
            .split(';')
            .filter_map(|param| param.split_once(':'))
    }
}

impl FromStr for Crypto {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::syntax(format!("invalid a=crypto value '{s}'"));
        let mut parts = s.split_whitespace();
        let tag = parse_uint::<u32>("crypto tag", parts.next().ok_or_else(invalid)?)?;
        if tag > 999_999_999 {
            return Err(invalid());
        }
        let suite = parts.next().filter(|p| is_token(p)).ok_or_else(invalid)?;
        let key_params = parts.next().ok_or_else(invalid)?;
        if key_params.split(';').any(|param| !param.contains(':')) {
            return Err(invalid());
        }
        Ok(Crypto {
            tag,
            suite: suite.to_string(),
            key_params: key_params.to_string(),
            session_params: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for Crypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.tag, self.suite, self.key_params)?;
        for param in &self.session_params {
            write!(f, " {param}")?;
        }
        Ok(())
    }
}
