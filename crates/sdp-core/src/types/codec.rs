//! Codec view derived from `rtpmap`, `fmtp` and `rtcp-fb` attributes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, FeedbackPayloadType};
use crate::error::{Error, Result};
use crate::types::media::MediaDescription;
use crate::types::session::SessionDescription;

/// Codec parameters of one RTP payload type.
///
/// Used both as lookup result and as the "wanted" side of
/// [`SessionDescription::payload_type_for_codec`], where empty fields and a
/// zero clock rate mean "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Codec {
    pub payload_type: u8,
    pub name: String,
    pub clock_rate: u32,
    pub encoding_parameters: String,
    pub fmtp: String,
    pub rtcp_feedback: Vec<String>,
}

impl Codec {
    /// Lookup key matching any codec called `name`
    pub fn named(name: impl Into<String>) -> Self {
        Codec {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_clock_rate(mut self, clock_rate: u32) -> Self {
        self.clock_rate = clock_rate;
        self
    }

    pub fn with_fmtp(mut self, fmtp: impl Into<String>) -> Self {
        self.fmtp = fmtp.into();
        self
    }

    /// Whether `self`, read as a lookup key, accepts `candidate`.
    ///
    /// Names compare case-insensitively; clock rate, encoding parameters and
    /// fmtp only when set on `self`. Fmtp strings are compared as sets of
    /// `;`-separated parameters, ignoring order and surrounding whitespace.
    pub fn matches(&self, candidate: &Codec) -> bool {
        if !self.name.is_empty() && !self.name.eq_ignore_ascii_case(&candidate.name) {
            return false;
        }
        if self.clock_rate != 0 && self.clock_rate != candidate.clock_rate {
            return false;
        }
        if !self.encoding_parameters.is_empty()
            && self.encoding_parameters != candidate.encoding_parameters
        {
            return false;
        }
        if !self.fmtp.is_empty() && !equivalent_fmtp(&self.fmtp, &candidate.fmtp) {
            return false;
        }
        true
    }
}

fn fmtp_parameters(fmtp: &str) -> Vec<&str> {
    let mut params: Vec<&str> = fmtp
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    params.sort_unstable();
    params
}

fn equivalent_fmtp(wanted: &str, got: &str) -> bool {
    fmtp_parameters(wanted) == fmtp_parameters(got)
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.payload_type, self.name, self.clock_rate)?;
        if !self.encoding_parameters.is_empty() {
            write!(f, "/{}", self.encoding_parameters)?;
        }
        if !self.fmtp.is_empty() {
            write!(f, " ({})", self.fmtp)?;
        }
        Ok(())
    }
}

/// Payload type → codec index, in order of first appearance.
///
/// The map is a snapshot: rebuild it after mutating the attributes it was
/// derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecMap {
    codecs: Vec<Codec>,
}

impl CodecMap {
    fn entry(&mut self, payload_type: u8) -> &mut Codec {
        let index = match self.codecs.iter().position(|c| c.payload_type == payload_type) {
            Some(index) => index,
            None => {
                self.codecs.push(Codec {
                    payload_type,
                    ..Default::default()
                });
                self.codecs.len() - 1
            }
        };
        &mut self.codecs[index]
    }

    fn merge(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::RtpMap(rtpmap) => {
                let codec = self.entry(rtpmap.payload_type);
                codec.name = rtpmap.encoding_name.clone();
                codec.clock_rate = rtpmap.clock_rate;
                codec.encoding_parameters = rtpmap.encoding_params.clone().unwrap_or_default();
            }
            Attribute::Fmtp(fmtp) => {
                if let Ok(payload_type) = fmtp.format.parse::<u8>() {
                    self.entry(payload_type).fmtp = fmtp.parameters.clone();
                }
            }
            Attribute::RtcpFb(feedback) => {
                if let FeedbackPayloadType::PayloadType(payload_type) = feedback.payload_type {
                    let value = feedback.feedback_value();
                    self.entry(payload_type).rtcp_feedback.push(value);
                }
            }
            _ => {}
        }
    }

    fn extend_from(&mut self, media: &MediaDescription) {
        for attribute in &media.attributes {
            self.merge(attribute);
        }
    }

    pub fn get(&self, payload_type: u8) -> Option<&Codec> {
        self.codecs.iter().find(|c| c.payload_type == payload_type)
    }

    /// Payload type of the first codec accepted by `wanted`
    pub fn find(&self, wanted: &Codec) -> Option<u8> {
        self.codecs
            .iter()
            .find(|c| wanted.matches(c))
            .map(|c| c.payload_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Codec> {
        self.codecs.iter()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl MediaDescription {
    /// Codecs declared in this media section
    pub fn codecs(&self) -> CodecMap {
        let mut map = CodecMap::default();
        map.extend_from(self);
        map
    }
}

impl SessionDescription {
    /// Codecs declared across all media sections.
    ///
    /// A payload type mentioned in several sections is merged into one entry.
    pub fn codecs(&self) -> CodecMap {
        let mut map = CodecMap::default();
        for media in &self.media {
            map.extend_from(media);
        }
        map
    }

    pub fn codec_for_payload_type(&self, payload_type: u8) -> Result<Codec> {
        self.codecs()
            .get(payload_type)
            .cloned()
            .ok_or(Error::PayloadTypeNotFound(payload_type))
    }

    /// Payload type of the first codec, in document order, matching `wanted`
    pub fn payload_type_for_codec(&self, wanted: &Codec) -> Result<u8> {
        self.codecs().find(wanted).ok_or(Error::CodecNotFound)
    }
}
