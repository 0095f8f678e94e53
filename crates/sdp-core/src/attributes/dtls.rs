//! DTLS-SRTP related attributes
//!
//! - `a=fingerprint:<hash-function> <fingerprint>` (RFC 8122)
//! - `a=setup:<role>` (RFC 4145)
//!
//! Fingerprints are checked for shape only; nothing here verifies them
//! against a certificate.

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{char, space1},
    combinator::{map, recognize},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{parse_all, token};
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// `sha-256`, `sha-1`, ...; kept as written
    pub hash_function: String,
    /// Colon separated upper or lower case hex pairs
    pub value: String,
}

fn hex_pair(input: &str) -> IResult<&str, &str> {
    take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())(input)
}

fn fingerprint(input: &str) -> IResult<&str, Fingerprint> {
    map(
        separated_pair(token, space1, recognize(separated_list1(char(':'), hex_pair))),
        |(hash_function, value)| Fingerprint {
            hash_function: hash_function.to_string(),
            value: value.to_string(),
        },
    )(input)
}

impl FromStr for Fingerprint {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all("fingerprint", s, fingerprint)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hash_function, self.value)
    }
}

/// DTLS/TCP connection role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Setup {
    Active,
    Passive,
    ActPass,
    HoldConn,
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Setup::Active => "active",
            Setup::Passive => "passive",
            Setup::ActPass => "actpass",
            Setup::HoldConn => "holdconn",
        })
    }
}

impl FromStr for Setup {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Setup::Active),
            "passive" => Ok(Setup::Passive),
            "actpass" => Ok(Setup::ActPass),
            "holdconn" => Ok(Setup::HoldConn),
            _ => Err(FieldError::syntax(format!("invalid a=setup value '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint() {
        let text = "sha-256 4A:AD:B9:B1:3F:82:18:3B:54:02:12:DF:3E:5D:49:6B:19:E5:7C:AB:3E:4B:65:BA:BA:D5:1A:DA:3B:A9:63:0D";
        let fp: Fingerprint = text.parse().unwrap();
        assert_eq!(fp.hash_function, "sha-256");
        assert!(fp.value.starts_with("4A:AD"));
        assert_eq!(fp.to_string(), text);

        assert!("sha-1 ab:cd:ef".parse::<Fingerprint>().is_ok());
        assert!("sha-256".parse::<Fingerprint>().is_err());
        assert!("sha-256 4A:A".parse::<Fingerprint>().is_err());
        assert!("sha-256 4A:ZZ".parse::<Fingerprint>().is_err());
        assert!("sha-256 4AAD".parse::<Fingerprint>().is_err());
    }

    #[test]
    fn test_setup_roles() {
        for role in ["active", "passive", "actpass", "holdconn"] {
            assert_eq!(role.parse::<Setup>().unwrap().to_string(), role);
        }
        assert!("ACTPASS".parse::<Setup>().is_err());
    }
}
