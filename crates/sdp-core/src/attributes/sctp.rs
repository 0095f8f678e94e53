//! SCTP data channel attributes
//!
//! - `a=sctpmap:<port> <protocol> [<streams>]` (draft-ietf-mmusic-sctp-sdp-05)
//! - `a=sctp-port:<port>` and `a=max-message-size:<size>` (RFC 8841)

use std::fmt;
use std::str::FromStr;

use nom::{
    character::complete::space1,
    combinator::{map, opt},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{integer, parse_all, token};
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sctpmap {
    pub port: u16,
    /// Usually `webrtc-datachannel`
    pub protocol: String,
    pub streams: Option<u32>,
}

fn sctpmap(input: &str) -> IResult<&str, Sctpmap> {
    map(
        tuple((
            integer::<u16>,
            preceded(space1, token),
            opt(preceded(space1, integer::<u32>)),
        )),
        |(port, protocol, streams)| Sctpmap {
            port,
            protocol: protocol.to_string(),
            streams,
        },
    )(input)
}

impl FromStr for Sctpmap {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all("sctpmap", s, sctpmap)
    }
}

impl fmt::Display for Sctpmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.port, self.protocol)?;
        if let Some(streams) = self.streams {
            write!(f, " {streams}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sctpmap() {
        let map: Sctpmap = "5000 webrtc-datachannel 1024".parse().unwrap();
        assert_eq!(map.port, 5000);
        assert_eq!(map.protocol, "webrtc-datachannel");
        assert_eq!(map.streams, Some(1024));
        assert_eq!(map.to_string(), "5000 webrtc-datachannel 1024");

        let map: Sctpmap = "5000 webrtc-datachannel".parse().unwrap();
        assert_eq!(map.streams, None);

        assert!("webrtc-datachannel".parse::<Sctpmap>().is_err());
        assert!("70000 webrtc-datachannel".parse::<Sctpmap>().is_err());
    }
}
