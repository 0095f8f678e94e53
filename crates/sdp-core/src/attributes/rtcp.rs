//! RTCP related attributes
//!
//! - `a=rtcp:<port> [<nettype> <addrtype> <connection-address>]` (RFC 3605)
//! - `a=rtcp-fb:<pt|*> <type> [<parameters>]` (RFC 4585)

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::space1,
    combinator::{map, opt, rest, value},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::common::{integer, non_ws, parse_all, token};
use super::rtpmap::payload_type;
use crate::error::FieldError;
use crate::types::{AddressType, NetworkType};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rtcp {
    pub port: u16,
    pub address: Option<RtcpAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RtcpAddress {
    pub net_type: NetworkType,
    pub addr_type: AddressType,
    pub address: String,
}

impl FromStr for Rtcp {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (port, address) = parse_all(
            "rtcp",
            s,
            tuple((
                integer::<u16>,
                opt(tuple((
                    preceded(space1, non_ws),
                    preceded(space1, non_ws),
                    preceded(space1, non_ws),
                ))),
            )),
        )?;
        let address = match address {
            Some((net_type, addr_type, address)) => Some(RtcpAddress {
                net_type: net_type.parse()?,
                addr_type: addr_type.parse()?,
                address: address.to_string(),
            }),
            None => None,
        };
        Ok(Rtcp { port, address })
    }
}

impl fmt::Display for Rtcp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.port)?;
        if let Some(addr) = &self.address {
            write!(f, " {} {} {}", addr.net_type, addr.addr_type, addr.address)?;
        }
        Ok(())
    }
}

/// Payload type an `rtcp-fb` line applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackPayloadType {
    /// `*`, every payload type of the section
    Wildcard,
    PayloadType(u8),
}

impl fmt::Display for FeedbackPayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackPayloadType::Wildcard => f.write_str("*"),
            FeedbackPayloadType::PayloadType(pt) => write!(f, "{pt}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RtcpFb {
    pub payload_type: FeedbackPayloadType,
    /// `ack`, `nack`, `trr-int`, `ccm`, `goog-remb`, `transport-cc`, ...
    pub feedback_type: String,
    pub parameter: Option<String>,
}

impl RtcpFb {
    /// Feedback type and parameter as one string, e.g. `nack pli`
    pub fn feedback_value(&self) -> String {
        match &self.parameter {
            Some(param) => format!("{} {}", self.feedback_type, param),
            None => self.feedback_type.clone(),
        }
    }
}

fn rtcp_fb(input: &str) -> IResult<&str, RtcpFb> {
    map(
        tuple((
            alt((
                value(FeedbackPayloadType::Wildcard, tag("*")),
                map(payload_type, FeedbackPayloadType::PayloadType),
            )),
            preceded(space1, token),
            opt(preceded(space1, rest)),
        )),
        |(payload_type, feedback_type, parameter)| RtcpFb {
            payload_type,
            feedback_type: feedback_type.to_string(),
            parameter: parameter.map(str::to_string),
        },
    )(input)
}

impl FromStr for RtcpFb {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all("rtcp-fb", s, rtcp_fb)
    }
}

impl fmt::Display for RtcpFb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.payload_type, self.feedback_value())
    }
}
