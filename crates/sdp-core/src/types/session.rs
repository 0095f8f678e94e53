//! Session-level model and accessors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeLevel, Direction, Group};
use crate::error::{Error, Result};
use crate::types::connection::{AddressType, Bandwidth, ConnectionData, EncryptionKey, NetworkType};
use crate::types::media::{MediaDescription, MediaType};

/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub username: String,
    pub session_id: u64,
    pub session_version: u64,
    pub net_type: NetworkType,
    pub addr_type: AddressType,
    pub unicast_address: String,
}

impl Origin {
    pub fn new(
        username: impl Into<String>,
        session_id: u64,
        session_version: u64,
        addr_type: AddressType,
        unicast_address: impl Into<String>,
    ) -> Self {
        Origin {
            username: username.into(),
            session_id,
            session_version,
            net_type: NetworkType::In,
            addr_type,
            unicast_address: unicast_address.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}

/// `t=<start-time> <stop-time>`; zero means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Timing {
    pub start: u64,
    pub stop: u64,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.stop)
    }
}

/// `r=<interval> <active duration> <offsets from start-time>`, all in seconds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepeatTime {
    pub interval: u64,
    pub duration: u64,
    pub offsets: Vec<u64>,
}

impl fmt::Display for RepeatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.interval, self.duration)?;
        for offset in &self.offsets {
            write!(f, " {offset}")?;
        }
        Ok(())
    }
}

/// A `t=` line and the `r=` lines that follow it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeDescription {
    pub timing: Timing,
    pub repeat_times: Vec<RepeatTime>,
}

impl TimeDescription {
    pub fn new(start: u64, stop: u64) -> Self {
        TimeDescription {
            timing: Timing { start, stop },
            repeat_times: Vec::new(),
        }
    }
}

/// One `<adjustment time> <offset>` pair of a `z=` line, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeZone {
    pub adjustment_time: u64,
    pub offset: i64,
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.adjustment_time, self.offset)
    }
}

/// A complete SDP document.
///
/// The description exclusively owns its media sections and attributes;
/// `clone()` produces an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionDescription {
    /// `v=`, always 0
    pub version: u32,
    pub origin: Origin,
    /// `s=`
    pub session_name: String,
    /// `i=`
    pub information: Option<String>,
    /// `u=`
    pub uri: Option<String>,
    /// `e=`
    pub email: Option<String>,
    /// `p=`
    pub phone: Option<String>,
    pub connection: Option<ConnectionData>,
    pub bandwidths: Vec<Bandwidth>,
    /// At least one entry in a decoded document
    pub time_descriptions: Vec<TimeDescription>,
    /// Pairs of a single `z=` line; empty when the line is absent
    pub time_zones: Vec<TimeZone>,
    pub encryption_key: Option<EncryptionKey>,
    pub attributes: Vec<Attribute>,
    pub media: Vec<MediaDescription>,
}

impl SessionDescription {
    /// Minimal description with `v=0` and a single unbounded `t=0 0`
    pub fn new(origin: Origin, session_name: impl Into<String>) -> Self {
        SessionDescription {
            version: 0,
            origin,
            session_name: session_name.into(),
            information: None,
            uri: None,
            email: None,
            phone: None,
            connection: None,
            bandwidths: Vec::new(),
            time_descriptions: vec![TimeDescription::new(0, 0)],
            time_zones: Vec::new(),
            encryption_key: None,
            attributes: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn with_information(mut self, information: impl Into<String>) -> Self {
        self.information = Some(information.into());
        self
    }

    pub fn with_connection(mut self, connection: ConnectionData) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidths.push(bandwidth);
        self
    }

    pub fn with_media(mut self, media: MediaDescription) -> Self {
        self.media.push(media);
        self
    }

    /// Append a session-level attribute.
    ///
    /// Fails for attributes that may only appear inside a media section.
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if !attribute.allowed_at(AttributeLevel::Session) {
            return Err(Error::AttributeScope {
                line: 0,
                name: attribute.name().to_string(),
                level: AttributeLevel::Session,
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// First session-level attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Every session-level attribute called `name`, in document order
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes.iter().filter(move |a| a.name() == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Session-level direction attribute, if any
    pub fn direction(&self) -> Option<Direction> {
        self.attributes.iter().find_map(Attribute::direction)
    }

    /// First media section of `media_type` that is actually in use: non-zero
    /// port and not `inactive` (media-level direction wins over session-level).
    pub fn first_active_media(&self, media_type: MediaType) -> Option<&MediaDescription> {
        let session_direction = self.direction();
        self.media.iter().find(|m| {
            let direction = m.direction().or(session_direction);
            m.media_name.media_type == media_type
                && m.media_name.port.value != 0
                && direction != Some(Direction::Inactive)
        })
    }

    /// Media section tagged `a=mid:<mid>`
    pub fn media_by_mid(&self, mid: &str) -> Option<&MediaDescription> {
        self.media.iter().find(|m| m.mid() == Some(mid))
    }

    pub fn media_by_mid_mut(&mut self, mid: &str) -> Option<&mut MediaDescription> {
        self.media.iter_mut().find(|m| m.mid() == Some(mid))
    }

    fn group(&self, semantics: &str) -> Option<&Group> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::Group(group) if group.semantics == semantics => Some(group),
            _ => None,
        })
    }

    fn group_mut(&mut self, semantics: &str) -> Option<&mut Group> {
        self.attributes.iter_mut().find_map(|a| match a {
            Attribute::Group(group) if group.semantics == semantics => Some(group),
            _ => None,
        })
    }

    /// MIDs listed by the `a=group:<semantics>` line
    pub fn group_mids(&self, semantics: &str) -> Option<&[String]> {
        self.group(semantics).map(|g| g.mids.as_slice())
    }

    /// Add `mid` to the `a=group:<semantics>` line, creating the line if needed.
    ///
    /// Returns `false` if the MID was already listed.
    pub fn add_group_mid(&mut self, semantics: &str, mid: &str) -> bool {
        match self.group_mut(semantics) {
            Some(group) if group.mids.iter().any(|m| m == mid) => false,
            Some(group) => {
                group.mids.push(mid.to_string());
                true
            }
            None => {
                self.attributes.push(Attribute::Group(Group {
                    semantics: semantics.to_string(),
                    mids: vec![mid.to_string()],
                }));
                true
            }
        }
    }

    /// Remove `mid` from the `a=group:<semantics>` line.
    ///
    /// The group line itself stays, possibly with an empty MID list.
    pub fn remove_group_mid(&mut self, semantics: &str, mid: &str) -> bool {
        let Some(group) = self.group_mut(semantics) else {
            return false;
        };
        let before = group.mids.len();
        group.mids.retain(|m| m != mid);
        group.mids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, Direction};
    use crate::types::media::{MediaDescription, MediaType};

    fn session() -> SessionDescription {
        SessionDescription::new(
            Origin::new("-", 1, 1, AddressType::Ip4, "127.0.0.1"),
            "-",
        )
    }

    #[test]
    fn test_new_has_single_unbounded_timing() {
        let sdp = session();
        assert_eq!(sdp.version, 0);
        assert_eq!(sdp.time_descriptions, vec![TimeDescription::new(0, 0)]);
    }

    #[test]
    fn test_add_attribute_enforces_scope() {
        let mut sdp = session();
        assert!(sdp.add_attribute(Attribute::IceLite).is_ok());
        let err = sdp.add_attribute(Attribute::RtcpMux).unwrap_err();
        assert!(matches!(err, Error::AttributeScope { line: 0, .. }));
        assert_eq!(sdp.attributes, vec![Attribute::IceLite]);
    }

    #[test]
    fn test_group_mid_management() {
        let mut sdp = session();
        assert_eq!(sdp.group_mids("BUNDLE"), None);
        assert!(sdp.add_group_mid("BUNDLE", "0"));
        assert!(sdp.add_group_mid("BUNDLE", "1"));
        assert!(!sdp.add_group_mid("BUNDLE", "1"));
        assert_eq!(sdp.group_mids("BUNDLE"), Some(&["0".to_string(), "1".to_string()][..]));

        assert!(sdp.remove_group_mid("BUNDLE", "0"));
        assert!(!sdp.remove_group_mid("BUNDLE", "0"));
        assert!(!sdp.remove_group_mid("LS", "1"));
        assert!(sdp.remove_group_mid("BUNDLE", "1"));
        assert_eq!(sdp.group_mids("BUNDLE"), Some(&[][..]));
    }

    #[test]
    fn test_first_active_media() {
        let disabled = MediaDescription::new(MediaType::Audio, 0, "RTP/AVP", ["0"]);
        let mut inactive = MediaDescription::new(MediaType::Audio, 5000, "RTP/AVP", ["8"]);
        inactive.attributes.push(Attribute::Inactive);
        let active = MediaDescription::new(MediaType::Audio, 5002, "RTP/AVP", ["9"]);
        let sdp = session()
            .with_media(disabled)
            .with_media(inactive)
            .with_media(active);

        let found = sdp.first_active_media(MediaType::Audio).unwrap();
        assert_eq!(found.media_name.port.value, 5002);
        assert!(sdp.first_active_media(MediaType::Video).is_none());
    }

    #[test]
    fn test_session_level_inactive_applies_to_media() {
        let mut sdp = session().with_media(MediaDescription::new(MediaType::Video, 9, "RTP/AVP", ["96"]));
        sdp.add_attribute(Attribute::Inactive).unwrap();
        assert!(sdp.first_active_media(MediaType::Video).is_none());

        sdp.media[0].attributes.push(Attribute::SendRecv);
        assert_eq!(sdp.media[0].direction(), Some(Direction::SendRecv));
        assert!(sdp.first_active_media(MediaType::Video).is_some());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = session().with_media(MediaDescription::new(MediaType::Audio, 9, "RTP/AVP", ["0"]));
        let mut copy = original.clone();
        copy.media[0].attributes.push(Attribute::RtcpMux);
        copy.add_group_mid("BUNDLE", "0");
        assert!(original.media[0].attributes.is_empty());
        assert!(original.attributes.is_empty());
    }
}
