//! SDP Simulcast Attribute Parser (RFC 8853)
//!
//! Format: a=simulcast:<dir> <alt-list>[ <dir> <alt-list>]
//!
//! An alt-list is a `;` separated list of streams, each stream a `,`
//! separated list of alternative RIDs. A leading `~` marks a paused RID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rid::RidDirection;
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulcastId {
    pub id: String,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulcastStreams {
    pub direction: RidDirection,
    /// Outer list: streams; inner list: alternatives for one stream
    pub streams: Vec<Vec<SimulcastId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Simulcast {
    /// One entry per direction, in the order written
    pub directions: Vec<SimulcastStreams>,
}

impl Simulcast {
    pub fn streams(&self, direction: RidDirection) -> Option<&[Vec<SimulcastId>]> {
        self.directions
            .iter()
            .find(|d| d.direction == direction)
            .map(|d| d.streams.as_slice())
    }
}

fn parse_id(text: &str) -> Option<SimulcastId> {
    let (paused, id) = match text.strip_prefix('~') {
        Some(id) => (true, id),
        None => (false, text),
    };
    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| SimulcastId {
        id: id.to_string(),
        paused,
    })
}

fn parse_streams(text: &str) -> Option<Vec<Vec<SimulcastId>>> {
    text.split(';')
        .map(|stream| stream.split(',').map(parse_id).collect::<Option<Vec<_>>>())
        .collect()
}

impl FromStr for Simulcast {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::syntax(format!("invalid a=simulcast value '{s}'"));
        let parts: Vec<&str> = s.split(' ').collect();
        if parts.len() != 2 && parts.len() != 4 {
            return Err(invalid());
        }
        let mut directions: Vec<SimulcastStreams> = Vec::new();
        for pair in parts.chunks(2) {
            let direction = match pair[0] {
                "send" => RidDirection::Send,
                "recv" => RidDirection::Recv,
                _ => return Err(invalid()),
            };
            if directions.iter().any(|d| d.direction == direction) {
                return Err(invalid());
            }
            let streams = parse_streams(pair[1]).ok_or_else(invalid)?;
            directions.push(SimulcastStreams { direction, streams });
        }
        Ok(Simulcast { directions })
    }
}

impl fmt::Display for Simulcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, direction) in self.directions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} ", direction.direction)?;
            for (j, stream) in direction.streams.iter().enumerate() {
                if j > 0 {
                    f.write_str(";")?;
                }
                for (k, id) in stream.iter().enumerate() {
                    if k > 0 {
                        f.write_str(",")?;
                    }
                    if id.paused {
                        f.write_str("~")?;
                    }
                    f.write_str(&id.id)?;
                }
            }
        }
        Ok(())
    }
}
