//! SDP text decoder
//!
//! Decoding is driven one line at a time: the [`lexer`] reads the line key,
//! the [`grammar`] table decides whether that key is legal in the current
//! [`ParserState`] and which [`Handler`] decodes it, and the handler fills in
//! the [`SessionDescription`] under construction.
//!
//! # Example
//!
//! ```
//! use rvoip_sdp_core::parser::parse_session;
//! use rvoip_sdp_core::ParserConfig;
//!
//! let text = "v=0\r\n\
//!             o=- 20518 0 IN IP4 203.0.113.1\r\n\
//!             s= \r\n\
//!             t=0 0\r\n\
//!             m=audio 54400 RTP/SAVPF 0 96\r\n\
//!             a=rtpmap:96 opus/48000/2\r\n";
//!
//! let sdp = parse_session(text, &ParserConfig::default()).unwrap();
//! assert_eq!(sdp.media.len(), 1);
//! assert_eq!(sdp.to_string(), text);
//! ```

pub mod connection_parser;
pub mod grammar;
pub mod lexer;
pub mod media_parser;
pub mod session_parser;
pub mod time_parser;
pub mod validation;

use tracing::{debug, trace};

use crate::attributes::{Attribute, AttributeLevel};
use crate::config::ParserConfig;
use crate::error::{Error, FieldError, Result};
use crate::types::{MediaDescription, Origin, SessionDescription, TimeDescription};

pub use grammar::{Handler, LineKey, ParserState};
pub use lexer::Lexer;

use connection_parser::{parse_bandwidth, parse_connection, parse_encryption_key};
use media_parser::parse_media_name;
use session_parser::{parse_origin, parse_session_name, parse_text, parse_version};
use time_parser::{parse_repeat_time, parse_time_zones, parse_timing};

/// Decode a complete SDP document.
///
/// The whole document must be in `text`. Either every line decodes and the
/// grammar reaches a terminal state, or the first failure is returned with
/// its line number.
pub fn parse_session(text: &str, config: &ParserConfig) -> Result<SessionDescription> {
    let mut lexer = Lexer::new(text);
    let mut builder = SessionBuilder::new(config);
    let mut state = ParserState::Start;

    loop {
        let key = match lexer.read_key() {
            Ok(Some(key)) => key,
            Ok(None) => break,
            Err(err) => return Err(err.at(lexer.line())),
        };
        let line = lexer.line();
        let handler = state.transition(key).ok_or(Error::UnexpectedLine {
            line,
            key: key.as_char(),
            state: state.name(),
        })?;
        let next = handler.next_state();
        trace!(line, %key, from = %state, to = %next, "sdp transition");

        builder
            .apply(handler, &mut lexer)
            .and_then(|()| lexer.next_line())
            .map_err(|err| err.at(line))?;
        state = next;
    }

    if let Some(expected) = state.expected() {
        return Err(Error::Truncated {
            line: lexer.line(),
            expected,
        });
    }

    let session = builder.finish(lexer.line())?;
    debug!(
        lines = lexer.line(),
        media = session.media.len(),
        attributes = session.attributes.len(),
        "parsed session description"
    );
    Ok(session)
}

/// Document under construction.
///
/// The grammar guarantees `v=`, `o=` and `s=` come first, so the
/// description itself is created when the session name arrives and every
/// later handler writes into it directly.
struct SessionBuilder<'c> {
    config: &'c ParserConfig,
    version: u32,
    origin: Option<Origin>,
    session: Option<SessionDescription>,
}

impl<'c> SessionBuilder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        SessionBuilder {
            config,
            version: 0,
            origin: None,
            session: None,
        }
    }

    fn apply(
        &mut self,
        handler: Handler,
        lexer: &mut Lexer<'_>,
    ) -> std::result::Result<(), FieldError> {
        match handler {
            Handler::Version => self.version = parse_version(lexer)?,
            Handler::Origin => self.origin = Some(parse_origin(lexer)?),
            Handler::SessionName => {
                let name = parse_session_name(lexer)?;
                let origin = self
                    .origin
                    .take()
                    .ok_or_else(|| FieldError::syntax("session name before origin"))?;
                let mut session = SessionDescription::new(origin, name);
                session.version = self.version;
                session.time_descriptions.clear();
                self.session = Some(session);
            }
            Handler::SessionInformation => self.session()?.information = Some(parse_text(lexer)),
            Handler::Uri => self.session()?.uri = Some(parse_text(lexer)),
            Handler::Email => self.session()?.email = Some(parse_text(lexer)),
            Handler::Phone => self.session()?.phone = Some(parse_text(lexer)),
            Handler::SessionConnection => {
                let connection = parse_connection(lexer)?;
                self.session()?.connection = Some(connection);
            }
            Handler::SessionBandwidth => {
                let bandwidth = parse_bandwidth(lexer)?;
                self.session()?.bandwidths.push(bandwidth);
            }
            Handler::Timing => {
                let timing = parse_timing(lexer)?;
                self.session()?.time_descriptions.push(TimeDescription {
                    timing,
                    repeat_times: Vec::new(),
                });
            }
            Handler::RepeatTimes => {
                let repeat = parse_repeat_time(lexer)?;
                if let Some(time) = self.session()?.time_descriptions.last_mut() {
                    time.repeat_times.push(repeat);
                }
            }
            Handler::TimeZones => {
                let zones = parse_time_zones(lexer)?;
                self.session()?.time_zones = zones;
            }
            Handler::SessionEncryptionKey => {
                let key = parse_encryption_key(lexer)?;
                self.session()?.encryption_key = Some(key);
            }
            Handler::SessionAttribute => {
                let attribute = decode_attribute(lexer, self.config, AttributeLevel::Session)?;
                self.session()?.attributes.push(attribute);
            }
            Handler::Media => {
                let media_name = parse_media_name(lexer)?;
                self.session()?.media.push(MediaDescription::from(media_name));
            }
            Handler::MediaTitle => self.media()?.information = Some(parse_text(lexer)),
            Handler::MediaConnection => {
                let connection = parse_connection(lexer)?;
                self.media()?.connection = Some(connection);
            }
            Handler::MediaBandwidth => {
                let bandwidth = parse_bandwidth(lexer)?;
                self.media()?.bandwidths.push(bandwidth);
            }
            Handler::MediaEncryptionKey => {
                let key = parse_encryption_key(lexer)?;
                self.media()?.encryption_key = Some(key);
            }
            Handler::MediaAttribute => {
                let attribute = decode_attribute(lexer, self.config, AttributeLevel::Media)?;
                self.media()?.attributes.push(attribute);
            }
        }
        Ok(())
    }

    // Both lookups only fail if the grammar table lets a line in out of order
    fn session(&mut self) -> std::result::Result<&mut SessionDescription, FieldError> {
        self.session
            .as_mut()
            .ok_or_else(|| FieldError::syntax("session level line before s= line"))
    }

    fn media(&mut self) -> std::result::Result<&mut MediaDescription, FieldError> {
        self.session()?
            .media
            .last_mut()
            .ok_or_else(|| FieldError::syntax("media level line before any m= line"))
    }

    fn finish(self, line: usize) -> Result<SessionDescription> {
        self.session.ok_or(Error::Truncated {
            line,
            expected: "session name line",
        })
    }
}

/// `a=` lines: decode, then check the attribute is legal at `level`
fn decode_attribute(
    lexer: &mut Lexer<'_>,
    config: &ParserConfig,
    level: AttributeLevel,
) -> std::result::Result<Attribute, FieldError> {
    let text = lexer.read_line().trim_end_matches([' ', '\t']);
    let attribute = Attribute::parse(text, config.attribute_policy)?;
    if !attribute.allowed_at(level) {
        return Err(FieldError::NotAllowed {
            name: attribute.name().to_string(),
            level,
        });
    }
    Ok(attribute)
}
