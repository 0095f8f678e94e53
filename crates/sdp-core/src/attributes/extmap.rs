//! SDP Extension Map Attribute Parser
//!
//! Implements parser for extmap attributes as defined in RFC 8285.
//! Format: a=extmap:<value>["/"<direction>] <URI> <extensionattributes>

use std::fmt;
use std::str::FromStr;

use nom::{
    character::complete::{alpha1, char, space1},
    combinator::{map, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{integer, non_ws, parse_all};
use super::direction::Direction;
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extmap {
    /// 1-14 for one-byte headers, up to 255 with two-byte headers
    pub id: u16,
    pub direction: Option<Direction>,
    pub uri: String,
    pub extension_attributes: Option<String>,
}

fn extmap(input: &str) -> IResult<&str, Extmap> {
    map(
        tuple((
            integer::<u16>,
            opt(preceded(char('/'), map_res(alpha1, str::parse::<Direction>))),
            preceded(space1, non_ws),
            opt(preceded(space1, rest)),
        )),
        |(id, direction, uri, attributes)| Extmap {
            id,
            direction,
            uri: uri.to_string(),
            extension_attributes: attributes.map(str::to_string),
        },
    )(input)
}

impl FromStr for Extmap {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let extmap = parse_all("extmap", s, extmap)?;
        if extmap.id == 0 || extmap.id > 255 {
            return Err(FieldError::syntax(format!("extmap id {} out of range", extmap.id)));
        }
        Ok(extmap)
    }
}

impl fmt::Display for Extmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(direction) = self.direction {
            write!(f, "/{direction}")?;
        }
        write!(f, " {}", self.uri)?;
        if let Some(attributes) = &self.extension_attributes {
            write!(f, " {attributes}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extmap() {
        let ext: Extmap = "1 urn:ietf:params:rtp-hdrext:ssrc-audio-level".parse().unwrap();
        assert_eq!(ext.id, 1);
        assert_eq!(ext.direction, None);
        assert_eq!(ext.uri, "urn:ietf:params:rtp-hdrext:ssrc-audio-level");

        // RFC 8285 examples
        let text = "2/sendrecv urn:ietf:params:rtp-hdrext:toffset";
        let ext: Extmap = text.parse().unwrap();
        assert_eq!(ext.direction, Some(Direction::SendRecv));
        assert_eq!(ext.to_string(), text);

        let text = "3 urn:ietf:params:rtp-hdrext:encrypt urn:ietf:params:rtp-hdrext:smpte-tc 25@600/24";
        let ext: Extmap = text.parse().unwrap();
        assert_eq!(
            ext.extension_attributes.as_deref(),
            Some("urn:ietf:params:rtp-hdrext:smpte-tc 25@600/24")
        );
        assert_eq!(ext.to_string(), text);

        assert!("0 urn:x".parse::<Extmap>().is_err());
        assert!("256 urn:x".parse::<Extmap>().is_err());
        assert!("1/both urn:x".parse::<Extmap>().is_err());
        assert!("1".parse::<Extmap>().is_err());
    }
}
