//! SDP attribute (`a=`) sub-grammar
//!
//! Every registered attribute name maps to one [`Attribute`] variant with its
//! own value decoder (in the sub-modules) and `Display` encoder. Names are
//! case-sensitive.
//!
//! | Kind | Examples | Value |
//! |------|----------|-------|
//! | Property | `recvonly`, `ice-lite`, `rtcp-mux` | none; a value is an error |
//! | Text | `tool`, `label`, `identity` | kept verbatim |
//! | Numeric | `ptime`, `sctp-port`, `max-message-size` | unsigned decimal |
//! | Structured | `rtpmap`, `candidate`, `extmap`, `ssrc` | attribute specific grammar |
//!
//! Each attribute is legal at session level, media level or both; see
//! [`Attribute::allowed_at`]. Names outside the registry decode to
//! [`Attribute::Unknown`], which the parser keeps or rejects depending on the
//! configured [`AttributePolicy`].

use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::config::AttributePolicy;
use crate::error::{parse_uint, FieldError};

pub mod candidate;
pub mod common;
pub mod crypto;
pub mod direction;
pub mod dtls;
pub mod extmap;
pub mod fmtp;
pub mod group;
pub mod msid;
pub mod rid;
pub mod rtcp;
pub mod rtpmap;
pub mod sctp;
pub mod simulcast;
pub mod ssrc;

pub use candidate::{Candidate, CandidateType, RemoteCandidate};
pub use crypto::Crypto;
pub use direction::Direction;
pub use dtls::{Fingerprint, Setup};
pub use extmap::Extmap;
pub use fmtp::Fmtp;
pub use group::{Group, MsidSemantic, SsrcGroup};
pub use msid::Msid;
pub use rid::{Rid, RidDirection};
pub use rtcp::{FeedbackPayloadType, Rtcp, RtcpAddress, RtcpFb};
pub use rtpmap::RtpMap;
pub use sctp::Sctpmap;
pub use simulcast::{Simulcast, SimulcastId, SimulcastStreams};
pub use ssrc::Ssrc;

use common::{expect_token, is_ice_char, is_token};

/// Where an attribute line appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeLevel {
    Session,
    Media,
}

impl fmt::Display for AttributeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeLevel::Session => f.write_str("session"),
            AttributeLevel::Media => f.write_str("media"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Session,
    Media,
    Both,
}

/// `a=orient` values (RFC 8866 section 6.11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
    Seascape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Seascape => "seascape",
        })
    }
}

impl FromStr for Orientation {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            "seascape" => Ok(Orientation::Seascape),
            _ => Err(FieldError::syntax(format!("invalid a=orient value '{s}'"))),
        }
    }
}

/// One decoded `a=` line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    BundleOnly,
    Candidate(Candidate),
    Cat(String),
    Charset(String),
    Crypto(Crypto),
    EndOfCandidates,
    Extmap(Extmap),
    ExtmapAllowMixed,
    Fingerprint(Fingerprint),
    Fmtp(Fmtp),
    Framerate(OrderedFloat<f64>),
    Group(Group),
    IceLite,
    IceMismatch,
    IceOptions(Vec<String>),
    IcePacing(u64),
    IcePwd(String),
    IceUfrag(String),
    Identity(String),
    Inactive,
    Keywords(String),
    Label(String),
    Lang(String),
    MaxMessageSize(u64),
    MaxPtime(u32),
    Mid(String),
    Msid(Msid),
    MsidSemantic(MsidSemantic),
    Orient(Orientation),
    Ptime(u32),
    Quality(u8),
    RecvOnly,
    RemoteCandidates(Vec<RemoteCandidate>),
    Rid(Rid),
    Rtcp(Rtcp),
    RtcpFb(RtcpFb),
    RtcpMux,
    RtcpRsize,
    RtpMap(RtpMap),
    SctpPort(u16),
    Sctpmap(Sctpmap),
    SdpLang(String),
    SendOnly,
    SendRecv,
    Setup(Setup),
    Simulcast(Simulcast),
    Ssrc(Ssrc),
    SsrcGroup(SsrcGroup),
    TlsId(String),
    Tool(String),
    Type(String),
    /// Unregistered name, only produced under [`AttributePolicy::Permissive`]
    Unknown { name: String, value: Option<String> },
}

fn flag(name: &str, value: Option<&str>, attribute: Attribute) -> Result<Attribute, FieldError> {
    match value {
        None => Ok(attribute),
        Some(_) => Err(FieldError::syntax(format!(
            "property attribute 'a={name}' must not have a value"
        ))),
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, FieldError> {
    value.ok_or_else(|| FieldError::syntax(format!("attribute 'a={name}' requires a value")))
}

fn ice_string(name: &str, value: &str) -> Result<String, FieldError> {
    if value.is_empty() || !value.chars().all(is_ice_char) {
        return Err(FieldError::syntax(format!("invalid a={name} value '{value}'")));
    }
    Ok(value.to_string())
}

fn tls_id(value: &str) -> Result<String, FieldError> {
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '-' | '_'));
    if value.is_empty() || !valid {
        return Err(FieldError::syntax(format!("invalid a=tls-id value '{value}'")));
    }
    Ok(value.to_string())
}

fn framerate(value: &str) -> Result<OrderedFloat<f64>, FieldError> {
    let invalid = || FieldError::syntax(format!("invalid a=framerate value '{value}'"));
    let (whole, fraction) = value.split_once('.').unwrap_or((value, "0"));
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return Err(invalid());
    }
    value.parse::<f64>().map(OrderedFloat).map_err(|_| invalid())
}

fn quality(value: &str) -> Result<u8, FieldError> {
    let quality = parse_uint::<u8>("quality", value)?;
    if quality > 10 {
        return Err(FieldError::syntax(format!("a=quality {quality} is outside 0-10")));
    }
    Ok(quality)
}

impl Attribute {
    /// Decode the text after `a=`.
    ///
    /// Under [`AttributePolicy::Strict`] an unregistered name is an
    /// [`FieldError::UnsupportedAttribute`]; otherwise it becomes
    /// [`Attribute::Unknown`]. Level checks are left to the caller.
    pub fn parse(line: &str, policy: AttributePolicy) -> Result<Self, FieldError> {
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (line, None),
        };
        if !is_token(name) {
            return Err(FieldError::syntax(format!("invalid attribute name in 'a={line}'")));
        }

        let attribute = match name {
            "bundle-only" => flag(name, value, Attribute::BundleOnly)?,
            "candidate" => Attribute::Candidate(required(name, value)?.parse()?),
            "cat" => Attribute::Cat(required(name, value)?.to_string()),
            "charset" => Attribute::Charset(expect_token(name, required(name, value)?)?),
            "crypto" => Attribute::Crypto(required(name, value)?.parse()?),
            "end-of-candidates" => flag(name, value, Attribute::EndOfCandidates)?,
            "extmap" => Attribute::Extmap(required(name, value)?.parse()?),
            "extmap-allow-mixed" => flag(name, value, Attribute::ExtmapAllowMixed)?,
            "fingerprint" => Attribute::Fingerprint(required(name, value)?.parse()?),
            "fmtp" => Attribute::Fmtp(required(name, value)?.parse()?),
            "framerate" => Attribute::Framerate(framerate(required(name, value)?)?),
            "group" => Attribute::Group(required(name, value)?.parse()?),
            "ice-lite" => flag(name, value, Attribute::IceLite)?,
            "ice-mismatch" => flag(name, value, Attribute::IceMismatch)?,
            "ice-options" => {
                let value = required(name, value)?;
                let options = value
                    .split(' ')
                    .map(|option| expect_token(name, option))
                    .collect::<Result<Vec<_>, _>>()?;
                Attribute::IceOptions(options)
            }
            "ice-pacing" => Attribute::IcePacing(parse_uint("ice-pacing", required(name, value)?)?),
            "ice-pwd" => Attribute::IcePwd(ice_string(name, required(name, value)?)?),
            "ice-ufrag" => Attribute::IceUfrag(ice_string(name, required(name, value)?)?),
            "identity" => Attribute::Identity(required(name, value)?.to_string()),
            "inactive" => flag(name, value, Attribute::Inactive)?,
            "keywds" => Attribute::Keywords(required(name, value)?.to_string()),
            "label" => Attribute::Label(required(name, value)?.to_string()),
            "lang" => Attribute::Lang(expect_token(name, required(name, value)?)?),
            "max-message-size" => {
                Attribute::MaxMessageSize(parse_uint("max-message-size", required(name, value)?)?)
            }
            "maxptime" => Attribute::MaxPtime(parse_uint("maxptime", required(name, value)?)?),
            "mid" => Attribute::Mid(expect_token(name, required(name, value)?)?),
            "msid" => Attribute::Msid(required(name, value)?.parse()?),
            "msid-semantic" => Attribute::MsidSemantic(required(name, value)?.parse()?),
            "orient" => Attribute::Orient(required(name, value)?.parse()?),
            "ptime" => Attribute::Ptime(parse_uint("ptime", required(name, value)?)?),
            "quality" => Attribute::Quality(quality(required(name, value)?)?),
            "recvonly" => flag(name, value, Attribute::RecvOnly)?,
            "remote-candidates" => Attribute::RemoteCandidates(
                candidate::parse_remote_candidates(required(name, value)?)?,
            ),
            "rid" => Attribute::Rid(required(name, value)?.parse()?),
            "rtcp" => Attribute::Rtcp(required(name, value)?.parse()?),
            "rtcp-fb" => Attribute::RtcpFb(required(name, value)?.parse()?),
            "rtcp-mux" => flag(name, value, Attribute::RtcpMux)?,
            "rtcp-rsize" => flag(name, value, Attribute::RtcpRsize)?,
            "rtpmap" => Attribute::RtpMap(required(name, value)?.parse()?),
            "sctp-port" => Attribute::SctpPort(parse_uint("sctp-port", required(name, value)?)?),
            "sctpmap" => Attribute::Sctpmap(required(name, value)?.parse()?),
            "sdplang" => Attribute::SdpLang(expect_token(name, required(name, value)?)?),
            "sendonly" => flag(name, value, Attribute::SendOnly)?,
            "sendrecv" => flag(name, value, Attribute::SendRecv)?,
            "setup" => Attribute::Setup(required(name, value)?.parse()?),
            "simulcast" => Attribute::Simulcast(required(name, value)?.parse()?),
            "ssrc" => Attribute::Ssrc(required(name, value)?.parse()?),
            "ssrc-group" => Attribute::SsrcGroup(required(name, value)?.parse()?),
            "tls-id" => Attribute::TlsId(tls_id(required(name, value)?)?),
            "tool" => Attribute::Tool(required(name, value)?.to_string()),
            "type" => Attribute::Type(required(name, value)?.to_string()),
            _ => match policy {
                AttributePolicy::Strict => {
                    return Err(FieldError::UnsupportedAttribute(name.to_string()));
                }
                AttributePolicy::Permissive => Attribute::Unknown {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                },
            },
        };
        Ok(attribute)
    }

    /// Attribute name as written before the `:`
    pub fn name(&self) -> &str {
        match self {
            Attribute::BundleOnly => "bundle-only",
            Attribute::Candidate(_) => "candidate",
            Attribute::Cat(_) => "cat",
            Attribute::Charset(_) => "charset",
            Attribute::Crypto(_) => "crypto",
            Attribute::EndOfCandidates => "end-of-candidates",
            Attribute::Extmap(_) => "extmap",
            Attribute::ExtmapAllowMixed => "extmap-allow-mixed",
            Attribute::Fingerprint(_) => "fingerprint",
            Attribute::Fmtp(_) => "fmtp",
            Attribute::Framerate(_) => "framerate",
            Attribute::Group(_) => "group",
            Attribute::IceLite => "ice-lite",
            Attribute::IceMismatch => "ice-mismatch",
            Attribute::IceOptions(_) => "ice-options",
            Attribute::IcePacing(_) => "ice-pacing",
            Attribute::IcePwd(_) => "ice-pwd",
            Attribute::IceUfrag(_) => "ice-ufrag",
            Attribute::Identity(_) => "identity",
            Attribute::Inactive => "inactive",
            Attribute::Keywords(_) => "keywds",
            Attribute::Label(_) => "label",
            Attribute::Lang(_) => "lang",
            Attribute::MaxMessageSize(_) => "max-message-size",
            Attribute::MaxPtime(_) => "maxptime",
            Attribute::Mid(_) => "mid",
            Attribute::Msid(_) => "msid",
            Attribute::MsidSemantic(_) => "msid-semantic",
            Attribute::Orient(_) => "orient",
            Attribute::Ptime(_) => "ptime",
            Attribute::Quality(_) => "quality",
            Attribute::RecvOnly => "recvonly",
            Attribute::RemoteCandidates(_) => "remote-candidates",
            Attribute::Rid(_) => "rid",
            Attribute::Rtcp(_) => "rtcp",
            Attribute::RtcpFb(_) => "rtcp-fb",
            Attribute::RtcpMux => "rtcp-mux",
            Attribute::RtcpRsize => "rtcp-rsize",
            Attribute::RtpMap(_) => "rtpmap",
            Attribute::SctpPort(_) => "sctp-port",
            Attribute::Sctpmap(_) => "sctpmap",
            Attribute::SdpLang(_) => "sdplang",
            Attribute::SendOnly => "sendonly",
            Attribute::SendRecv => "sendrecv",
            Attribute::Setup(_) => "setup",
            Attribute::Simulcast(_) => "simulcast",
            Attribute::Ssrc(_) => "ssrc",
            Attribute::SsrcGroup(_) => "ssrc-group",
            Attribute::TlsId(_) => "tls-id",
            Attribute::Tool(_) => "tool",
            Attribute::Type(_) => "type",
            Attribute::Unknown { name, .. } => name,
        }
    }

    fn scope(&self) -> Scope {
        match self {
            Attribute::IceLite
            | Attribute::IcePacing(_)
            | Attribute::Identity(_)
            | Attribute::Group(_)
            | Attribute::MsidSemantic(_)
            | Attribute::Tool(_)
            | Attribute::Type(_)
            | Attribute::Charset(_)
            | Attribute::Keywords(_)
            | Attribute::Cat(_) => Scope::Session,

            Attribute::BundleOnly
            | Attribute::Candidate(_)
            | Attribute::Crypto(_)
            | Attribute::Fmtp(_)
            | Attribute::Framerate(_)
            | Attribute::IceMismatch
            | Attribute::Label(_)
            | Attribute::MaxMessageSize(_)
            | Attribute::MaxPtime(_)
            | Attribute::Mid(_)
            | Attribute::Msid(_)
            | Attribute::Orient(_)
            | Attribute::Ptime(_)
            | Attribute::Quality(_)
            | Attribute::RemoteCandidates(_)
            | Attribute::Rid(_)
            | Attribute::Rtcp(_)
            | Attribute::RtcpFb(_)
            | Attribute::RtcpMux
            | Attribute::RtcpRsize
            | Attribute::RtpMap(_)
            | Attribute::SctpPort(_)
            | Attribute::Sctpmap(_)
            | Attribute::Simulcast(_)
            | Attribute::Ssrc(_)
            | Attribute::SsrcGroup(_) => Scope::Media,

            Attribute::EndOfCandidates
            | Attribute::Extmap(_)
            | Attribute::ExtmapAllowMixed
            | Attribute::Fingerprint(_)
            | Attribute::IceOptions(_)
            | Attribute::IcePwd(_)
            | Attribute::IceUfrag(_)
            | Attribute::Inactive
            | Attribute::Lang(_)
            | Attribute::RecvOnly
            | Attribute::SdpLang(_)
            | Attribute::SendOnly
            | Attribute::SendRecv
            | Attribute::Setup(_)
            | Attribute::TlsId(_)
            | Attribute::Unknown { .. } => Scope::Both,
        }
    }

    /// Whether this attribute may appear at `level`
    pub fn allowed_at(&self, level: AttributeLevel) -> bool {
        match self.scope() {
            Scope::Both => true,
            Scope::Session => level == AttributeLevel::Session,
            Scope::Media => level == AttributeLevel::Media,
        }
    }

    /// The direction this attribute expresses, if it is one of the four direction flags
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Attribute::SendRecv => Some(Direction::SendRecv),
            Attribute::SendOnly => Some(Direction::SendOnly),
            Attribute::RecvOnly => Some(Direction::RecvOnly),
            Attribute::Inactive => Some(Direction::Inactive),
            _ => None,
        }
    }

    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::SendRecv => Attribute::SendRecv,
            Direction::SendOnly => Attribute::SendOnly,
            Direction::RecvOnly => Attribute::RecvOnly,
            Direction::Inactive => Attribute::Inactive,
        }
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::BundleOnly
            | Attribute::EndOfCandidates
            | Attribute::ExtmapAllowMixed
            | Attribute::IceLite
            | Attribute::IceMismatch
            | Attribute::Inactive
            | Attribute::RecvOnly
            | Attribute::RtcpMux
            | Attribute::RtcpRsize
            | Attribute::SendOnly
            | Attribute::SendRecv => Ok(()),

            Attribute::Cat(text)
            | Attribute::Charset(text)
            | Attribute::IcePwd(text)
            | Attribute::IceUfrag(text)
            | Attribute::Identity(text)
            | Attribute::Keywords(text)
            | Attribute::Label(text)
            | Attribute::Lang(text)
            | Attribute::Mid(text)
            | Attribute::SdpLang(text)
            | Attribute::TlsId(text)
            | Attribute::Tool(text)
            | Attribute::Type(text) => write!(f, ":{text}"),

            Attribute::Candidate(v) => write!(f, ":{v}"),
            Attribute::Crypto(v) => write!(f, ":{v}"),
            Attribute::Extmap(v) => write!(f, ":{v}"),
            Attribute::Fingerprint(v) => write!(f, ":{v}"),
            Attribute::Fmtp(v) => write!(f, ":{v}"),
            Attribute::Framerate(v) => write!(f, ":{v}"),
            Attribute::Group(v) => write!(f, ":{v}"),
            Attribute::IceOptions(options) => write!(f, ":{}", options.join(" ")),
            Attribute::IcePacing(v) => write!(f, ":{v}"),
            Attribute::MaxMessageSize(v) => write!(f, ":{v}"),
            Attribute::MaxPtime(v) | Attribute::Ptime(v) => write!(f, ":{v}"),
            Attribute::Msid(v) => write!(f, ":{v}"),
            Attribute::MsidSemantic(v) => write!(f, ":{v}"),
            Attribute::Orient(v) => write!(f, ":{v}"),
            Attribute::Quality(v) => write!(f, ":{v}"),
            Attribute::RemoteCandidates(list) => {
                for (i, candidate) in list.iter().enumerate() {
                    f.write_str(if i == 0 { ":" } else { " " })?;
                    write!(f, "{candidate}")?;
                }
                Ok(())
            }
            Attribute::Rid(v) => write!(f, ":{v}"),
            Attribute::Rtcp(v) => write!(f, ":{v}"),
            Attribute::RtcpFb(v) => write!(f, ":{v}"),
            Attribute::RtpMap(v) => write!(f, ":{v}"),
            Attribute::SctpPort(v) => write!(f, ":{v}"),
            Attribute::Sctpmap(v) => write!(f, ":{v}"),
            Attribute::Setup(v) => write!(f, ":{v}"),
            Attribute::Simulcast(v) => write!(f, ":{v}"),
            Attribute::Ssrc(v) => write!(f, ":{v}"),
            Attribute::SsrcGroup(v) => write!(f, ":{v}"),
            Attribute::Unknown { value, .. } => match value {
                Some(value) => write!(f, ":{value}"),
                None => Ok(()),
            },
        }
    }
}

/// Writes `name[:value]`, without the `a=` prefix
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        self.fmt_value(f)
    }
}

impl FromStr for Attribute {
    type Err = FieldError;

    /// Decode `name[:value]` under the default [`AttributePolicy`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::parse(s, AttributePolicy::default())
    }
}
