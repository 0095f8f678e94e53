//! SDP RTP Map Attribute Parser
//!
//! Implements parser for rtpmap attributes as defined in RFC 8866.
//! Format: a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space1},
    combinator::{map, opt, verify},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{integer, parse_all};
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RtpMap {
    pub payload_type: u8,
    pub encoding_name: String,
    pub clock_rate: u32,
    /// Channel count for audio, kept as text
    pub encoding_params: Option<String>,
}

/// Payload type (0-127)
pub(crate) fn payload_type(input: &str) -> IResult<&str, u8> {
    verify(integer::<u8>, |pt| *pt <= 127)(input)
}

fn encoding_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_ascii_whitespace() && c != '/')(input)
}

fn rtpmap(input: &str) -> IResult<&str, RtpMap> {
    map(
        tuple((
            payload_type,
            preceded(space1, encoding_name),
            preceded(char('/'), integer::<u32>),
            opt(preceded(char('/'), digit1)),
        )),
        |(payload_type, name, clock_rate, params)| RtpMap {
            payload_type,
            encoding_name: name.to_string(),
            clock_rate,
            encoding_params: params.map(str::to_string),
        },
    )(input)
}

impl FromStr for RtpMap {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all("rtpmap", s, rtpmap)
    }
}

impl fmt::Display for RtpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.payload_type, self.encoding_name, self.clock_rate)?;
        if let Some(params) = &self.encoding_params {
            write!(f, "/{params}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtpmap_attribute_comprehensive() {
        // Valid cases
        assert!("96 H264/90000".parse::<RtpMap>().is_ok());
        assert!("0 PCMU/8000".parse::<RtpMap>().is_ok());
        assert!("101 telephone-event/8000".parse::<RtpMap>().is_ok());

        let opus: RtpMap = "111 opus/48000/2".parse().unwrap();
        assert_eq!(opus.payload_type, 111);
        assert_eq!(opus.encoding_name, "opus");
        assert_eq!(opus.clock_rate, 48000);
        assert_eq!(opus.encoding_params.as_deref(), Some("2"));
        assert_eq!(opus.to_string(), "111 opus/48000/2");

        // Payload type range
        assert!("127 opus/48000".parse::<RtpMap>().is_ok());
        assert!("128 opus/48000".parse::<RtpMap>().is_err());

        // Missing pieces
        assert!("96 H264".parse::<RtpMap>().is_err());
        assert!("96".parse::<RtpMap>().is_err());
        assert!("H264/90000".parse::<RtpMap>().is_err());
        assert!("96 H264/abc".parse::<RtpMap>().is_err());
        assert!("96 opus/48000/2 extra".parse::<RtpMap>().is_err());
    }
}
