//! Media sections (`m=` blocks)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeLevel, Direction};
use crate::error::{Error, FieldError, Result};
use crate::types::connection::{Bandwidth, ConnectionData, EncryptionKey};

/// Media type of an `m=` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Audio,
    Video,
    Text,
    Application,
    Message,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Text => "text",
            MediaType::Application => "application",
            MediaType::Message => "message",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = FieldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "audio" => Ok(MediaType::Audio),
            "video" => Ok(MediaType::Video),
            "text" => Ok(MediaType::Text),
            "application" => Ok(MediaType::Application),
            "message" => Ok(MediaType::Message),
            _ => Err(FieldError::syntax(format!("unsupported media type '{s}'"))),
        }
    }
}

/// `<port>[/<number of ports>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangedPort {
    pub value: u16,
    pub range: Option<u16>,
}

impl fmt::Display for RangedPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(range) = self.range {
            write!(f, "/{range}")?;
        }
        Ok(())
    }
}

/// `m=<media> <port> <proto> <fmt> ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaName {
    pub media_type: MediaType,
    pub port: RangedPort,
    /// Transport protocol split on `/`, e.g. `["UDP", "TLS", "RTP", "SAVPF"]`
    pub protos: Vec<String>,
    pub formats: Vec<String>,
}

impl fmt::Display for MediaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.media_type, self.port, self.protos.join("/"))?;
        for format in &self.formats {
            write!(f, " {format}")?;
        }
        Ok(())
    }
}

/// One media section and everything that follows its `m=` line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaDescription {
    pub media_name: MediaName,
    /// Media title (`i=`)
    pub information: Option<String>,
    pub connection: Option<ConnectionData>,
    pub bandwidths: Vec<Bandwidth>,
    pub encryption_key: Option<EncryptionKey>,
    pub attributes: Vec<Attribute>,
}

impl From<MediaName> for MediaDescription {
    fn from(media_name: MediaName) -> Self {
        MediaDescription {
            media_name,
            information: None,
            connection: None,
            bandwidths: Vec::new(),
            encryption_key: None,
            attributes: Vec::new(),
        }
    }
}

impl MediaDescription {
    /// Media section with the given `m=` line and nothing else.
    ///
    /// `proto` is given in its textual form (`"UDP/TLS/RTP/SAVPF"`).
    pub fn new<I, S>(media_type: MediaType, port: u16, proto: &str, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MediaDescription::from(MediaName {
            media_type,
            port: RangedPort {
                value: port,
                range: None,
            },
            protos: proto.split('/').map(str::to_string).collect(),
            formats: formats.into_iter().map(Into::into).collect(),
        })
    }

    pub fn with_connection(mut self, connection: ConnectionData) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Append a media-level attribute.
    ///
    /// Fails for attributes that may only appear at session level.
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if !attribute.allowed_at(AttributeLevel::Media) {
            return Err(Error::AttributeScope {
                line: 0,
                name: attribute.name().to_string(),
                level: AttributeLevel::Media,
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Builder form of [`add_attribute`](Self::add_attribute)
    pub fn with_attribute(mut self, attribute: Attribute) -> Result<Self> {
        self.add_attribute(attribute)?;
        Ok(self)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes.iter().filter(move |a| a.name() == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Value of `a=mid`
    pub fn mid(&self) -> Option<&str> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::Mid(mid) => Some(mid.as_str()),
            _ => None,
        })
    }

    /// Media-level direction attribute, if any
    pub fn direction(&self) -> Option<Direction> {
        self.attributes.iter().find_map(Attribute::direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_name_display() {
        let media = MediaDescription::new(MediaType::Video, 9, "UDP/TLS/RTP/SAVPF", ["96", "97"]);
        assert_eq!(media.media_name.protos, vec!["UDP", "TLS", "RTP", "SAVPF"]);
        assert_eq!(media.media_name.to_string(), "video 9 UDP/TLS/RTP/SAVPF 96 97");

        let mut ranged = media.media_name.clone();
        ranged.port.range = Some(2);
        assert_eq!(ranged.to_string(), "video 9/2 UDP/TLS/RTP/SAVPF 96 97");
    }

    #[test]
    fn test_media_type_allow_list() {
        assert_eq!("application".parse::<MediaType>(), Ok(MediaType::Application));
        assert!("image".parse::<MediaType>().is_err());
        assert!("Audio".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_attribute_lookup() {
        let media = MediaDescription::new(MediaType::Audio, 9, "RTP/AVP", ["0"])
            .with_attribute(Attribute::Mid("audio".to_string()))
            .unwrap()
            .with_attribute(Attribute::RtcpMux)
            .unwrap();
        assert_eq!(media.mid(), Some("audio"));
        assert!(media.has_attribute("rtcp-mux"));
        assert!(!media.has_attribute("rtcp-rsize"));
        assert_eq!(media.attributes_named("mid").count(), 1);

        let err = media.with_attribute(Attribute::IceLite).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedAttribute);
    }
}
