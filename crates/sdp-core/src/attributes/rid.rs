//! SDP RID Attribute Parser
//!
//! Implements parser for RTP stream identifiers as defined in RFC 8851.
//! Format: a=rid:<rid-id> <direction> [pt=<fmt-list>;]<restriction>=<value>...

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, space1},
    combinator::{map, opt, value},
    branch::alt,
    multi::separated_list1,
    sequence::{pair, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{parse_all, token};
use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RidDirection {
    Send,
    Recv,
}

impl fmt::Display for RidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RidDirection::Send => "send",
            RidDirection::Recv => "recv",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rid {
    pub id: String,
    pub direction: RidDirection,
    /// `name[=value]` restrictions in the order written, `pt` included
    pub params: Vec<(String, Option<String>)>,
}

impl Rid {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Payload types listed by the `pt=` restriction
    pub fn payload_types(&self) -> Vec<&str> {
        self.param("pt")
            .map(|list| list.split(',').collect())
            .unwrap_or_default()
    }
}

fn rid_id(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

fn rid_param(input: &str) -> IResult<&str, (String, Option<String>)> {
    map(
        pair(
            token,
            opt(preceded(char('='), take_while1(|c: char| c != ';' && !c.is_ascii_whitespace()))),
        ),
        |(name, value): (&str, Option<&str>)| (name.to_string(), value.map(str::to_string)),
    )(input)
}

fn rid(input: &str) -> IResult<&str, Rid> {
    map(
        tuple((
            rid_id,
            preceded(
                space1,
                alt((
                    value(RidDirection::Send, tag("send")),
                    value(RidDirection::Recv, tag("recv")),
                )),
            ),
            opt(preceded(space1, separated_list1(char(';'), rid_param))),
        )),
        |(id, direction, params)| Rid {
            id: id.to_string(),
            direction,
            params: params.unwrap_or_default(),
        },
    )(input)
}

impl FromStr for Rid {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all("rid", s, rid)
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.direction)?;
        for (index, (name, value)) in self.params.iter().enumerate() {
            f.write_str(if index == 0 { " " } else { ";" })?;
            f.write_str(name)?;
            if let Some(value) = value {
                write!(f, "={value}")?;
            }
        }
        Ok(())
    }
}
