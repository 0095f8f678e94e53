//! Canonical SDP emission
//!
//! Lines are written in RFC 8866 order with CRLF terminators:
//!
//! ```text
//! v o s i? u? e? p? c? b* (t r*)+ z? k? a* (m i? c? b* k? a*)*
//! ```
//!
//! `Display` on [`SessionDescription`] and [`serialize`] produce the same
//! text. Repeat times are always written in seconds, and a `z=` line with
//! several adjustments is written as one line of space separated pairs.

use std::fmt::{self, Write};

use bytes::{Bytes, BytesMut};

use crate::attributes::Attribute;
use crate::types::{Bandwidth, ConnectionData, EncryptionKey, MediaDescription, SessionDescription};

const CRLF: &str = "\r\n";

/// Encode a description to its canonical text.
///
/// The buffer is sized from [`SessionDescription::encoded_len`] so the text
/// is written without reallocation.
pub fn serialize(desc: &SessionDescription) -> Bytes {
    let mut buf = BytesMut::with_capacity(desc.encoded_len());
    // Writing into a BytesMut cannot fail
    let _ = write!(buf, "{desc}");
    buf.freeze()
}

/// `fmt::Write` sink that only counts bytes
#[derive(Default)]
struct LengthCounter(usize);

impl Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

impl SessionDescription {
    /// Exact byte length of the canonical text
    pub fn encoded_len(&self) -> usize {
        let mut counter = LengthCounter::default();
        let _ = write!(counter, "{self}");
        counter.0
    }

    /// Canonical text as bytes, see [`serialize`]
    pub fn to_bytes(&self) -> Bytes {
        serialize(self)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, key: char, value: impl fmt::Display) -> fmt::Result {
    write!(f, "{key}={value}{CRLF}")
}

fn write_connection_block(
    f: &mut fmt::Formatter<'_>,
    connection: Option<&ConnectionData>,
    bandwidths: &[Bandwidth],
) -> fmt::Result {
    if let Some(connection) = connection {
        write_line(f, 'c', connection)?;
    }
    for bandwidth in bandwidths {
        write_line(f, 'b', bandwidth)?;
    }
    Ok(())
}

fn write_key_and_attributes(
    f: &mut fmt::Formatter<'_>,
    key: Option<&EncryptionKey>,
    attributes: &[Attribute],
) -> fmt::Result {
    if let Some(key) = key {
        write_line(f, 'k', key)?;
    }
    for attribute in attributes {
        write_line(f, 'a', attribute)?;
    }
    Ok(())
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(f, 'v', self.version)?;
        write_line(f, 'o', &self.origin)?;
        write_line(f, 's', &self.session_name)?;
        let text_lines = [
            ('i', &self.information),
            ('u', &self.uri),
            ('e', &self.email),
            ('p', &self.phone),
        ];
        for (key, value) in text_lines {
            if let Some(value) = value {
                write_line(f, key, value)?;
            }
        }
        write_connection_block(f, self.connection.as_ref(), &self.bandwidths)?;

        for time in &self.time_descriptions {
            write_line(f, 't', time.timing)?;
            for repeat in &time.repeat_times {
                write_line(f, 'r', repeat)?;
            }
        }
        if !self.time_zones.is_empty() {
            f.write_str("z=")?;
            for (i, zone) in self.time_zones.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{zone}")?;
            }
            f.write_str(CRLF)?;
        }
        write_key_and_attributes(f, self.encryption_key.as_ref(), &self.attributes)?;

        for media in &self.media {
            write!(f, "{media}")?;
        }
        Ok(())
    }
}

/// Writes the `m=` line and every line of its section, each CRLF terminated
impl fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(f, 'm', &self.media_name)?;
        if let Some(information) = &self.information {
            write_line(f, 'i', information)?;
        }
        write_connection_block(f, self.connection.as_ref(), &self.bandwidths)?;
        write_key_and_attributes(f, self.encryption_key.as_ref(), &self.attributes)
    }
}
