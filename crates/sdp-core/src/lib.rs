//! # SDP-Core: Session Description Protocol codec
//!
//! Decodes SDP text (RFC 8866, formerly RFC 4566) into a typed
//! [`SessionDescription`] and encodes it back to canonical text.
//!
//! ## Features
//!
//! - **Grammar checked decoding**: line order is enforced by a static state
//!   table; every error carries the line number that caused it
//! - **Typed attributes**: the `a=` lines used by SIP and WebRTC decode into
//!   [`Attribute`] variants, with session/media level checks
//! - **Canonical output**: well-formed canonical input round-trips byte for byte
//! - **Codec lookup**: payload type to codec and back, merged from
//!   `rtpmap`, `fmtp` and `rtcp-fb` lines
//!
//! ## Usage
//!
//! ```rust
//! use rvoip_sdp_core::{parse, serialize, Codec};
//!
//! let text = "v=0\r\n\
//!             o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
//!             s=-\r\n\
//!             t=0 0\r\n\
//!             a=group:BUNDLE 0\r\n\
//!             m=video 9 UDP/TLS/RTP/SAVPF 120\r\n\
//!             c=IN IP4 0.0.0.0\r\n\
//!             a=mid:0\r\n\
//!             a=rtpmap:120 VP8/90000\r\n";
//!
//! let sdp = parse(text.as_bytes())?;
//! assert_eq!(sdp.group_mids("BUNDLE"), Some(&["0".to_string()][..]));
//! assert_eq!(sdp.payload_type_for_codec(&Codec::named("vp8"))?, 120);
//! assert_eq!(serialize(&sdp), text.as_bytes());
//! # Ok::<(), rvoip_sdp_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `lenient_parsing`: keep unregistered attributes as [`Attribute::Unknown`]
//!   by default instead of rejecting the document

pub mod attributes;
pub mod config;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod types;

use std::str::FromStr;

pub use attributes::{Attribute, AttributeLevel, Direction};
pub use config::{AttributePolicy, ParserConfig};
pub use error::{Error, ErrorKind, FieldError, NumericReason, Result};
pub use serializer::serialize;
pub use types::{
    Address, AddressQualifier, AddressType, Bandwidth, Codec, CodecMap, ConnectionData,
    EncryptionKey, KeyMethod, MediaDescription, MediaName, MediaType, NetworkType, Origin,
    RangedPort, RepeatTime, SessionDescription, TimeDescription, TimeZone, Timing,
};

/// Decode an SDP document with the default [`ParserConfig`]
pub fn parse(input: &[u8]) -> Result<SessionDescription> {
    parse_with(input, &ParserConfig::default())
}

/// Decode an SDP document
pub fn parse_with(input: &[u8], config: &ParserConfig) -> Result<SessionDescription> {
    let text = std::str::from_utf8(input).map_err(|err| Error::InvalidUtf8 {
        line: line_of(&input[..err.valid_up_to()]),
    })?;
    parser::parse_session(text, config)
}

// 1-based line number at the end of `prefix`, counting CR, LF and CRLF once each
fn line_of(prefix: &[u8]) -> usize {
    let bare_cr = prefix
        .windows(2)
        .filter(|pair| pair[0] == b'\r' && pair[1] != b'\n')
        .count()
        + usize::from(prefix.last() == Some(&b'\r'));
    let lf = prefix.iter().filter(|b| **b == b'\n').count();
    1 + lf + bare_cr
}

impl FromStr for SessionDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_session(s, &ParserConfig::default())
    }
}
