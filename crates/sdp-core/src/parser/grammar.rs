//! Line ordering grammar
//!
//! RFC 8866 fixes the order of SDP lines:
//!
//! ```text
//! v o s i? u? e? p? c? b* (t r*)+ z? k? a* (m i? c? b* k? a*)*
//! ```
//!
//! The grammar is encoded as a static table: each [`ParserState`] row lists
//! the line types that may come next together with the [`Handler`] that
//! decodes them. A handler fully determines the state the parser moves to,
//! so the table can be exercised on its own without decoding any text.

use std::fmt;

/// The single letter that opens every SDP line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKey {
    Version,
    Origin,
    SessionName,
    Information,
    Uri,
    Email,
    Phone,
    Connection,
    Bandwidth,
    Timing,
    RepeatTimes,
    TimeZones,
    EncryptionKey,
    Attribute,
    Media,
}

impl LineKey {
    pub const ALL: [LineKey; 15] = [
        LineKey::Version,
        LineKey::Origin,
        LineKey::SessionName,
        LineKey::Information,
        LineKey::Uri,
        LineKey::Email,
        LineKey::Phone,
        LineKey::Connection,
        LineKey::Bandwidth,
        LineKey::Timing,
        LineKey::RepeatTimes,
        LineKey::TimeZones,
        LineKey::EncryptionKey,
        LineKey::Attribute,
        LineKey::Media,
    ];

    pub fn from_byte(b: u8) -> Option<Self> {
        let key = match b {
            b'v' => LineKey::Version,
            b'o' => LineKey::Origin,
            b's' => LineKey::SessionName,
            b'i' => LineKey::Information,
            b'u' => LineKey::Uri,
            b'e' => LineKey::Email,
            b'p' => LineKey::Phone,
            b'c' => LineKey::Connection,
            b'b' => LineKey::Bandwidth,
            b't' => LineKey::Timing,
            b'r' => LineKey::RepeatTimes,
            b'z' => LineKey::TimeZones,
            b'k' => LineKey::EncryptionKey,
            b'a' => LineKey::Attribute,
            b'm' => LineKey::Media,
            _ => return None,
        };
        Some(key)
    }

    pub fn as_char(self) -> char {
        match self {
            LineKey::Version => 'v',
            LineKey::Origin => 'o',
            LineKey::SessionName => 's',
            LineKey::Information => 'i',
            LineKey::Uri => 'u',
            LineKey::Email => 'e',
            LineKey::Phone => 'p',
            LineKey::Connection => 'c',
            LineKey::Bandwidth => 'b',
            LineKey::Timing => 't',
            LineKey::RepeatTimes => 'r',
            LineKey::TimeZones => 'z',
            LineKey::EncryptionKey => 'k',
            LineKey::Attribute => 'a',
            LineKey::Media => 'm',
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.as_char())
    }
}

/// Position in the grammar: which line was accepted last.
///
/// The discriminant doubles as the row index into the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    Start,
    Version,
    Origin,
    SessionName,
    SessionInformation,
    Uri,
    Email,
    Phone,
    SessionBandwidth,
    Timing,
    TimeZones,
    SessionAttributes,
    Media,
    MediaTitle,
    MediaBandwidth,
    MediaAttributes,
}

impl ParserState {
    pub fn name(self) -> &'static str {
        match self {
            ParserState::Start => "start of input",
            ParserState::Version => "version",
            ParserState::Origin => "origin",
            ParserState::SessionName => "session name",
            ParserState::SessionInformation => "session information",
            ParserState::Uri => "uri",
            ParserState::Email => "email",
            ParserState::Phone => "phone",
            ParserState::SessionBandwidth => "session connection/bandwidth",
            ParserState::Timing => "timing",
            ParserState::TimeZones => "time zones",
            ParserState::SessionAttributes => "session key/attributes",
            ParserState::Media => "media",
            ParserState::MediaTitle => "media title",
            ParserState::MediaBandwidth => "media connection/bandwidth",
            ParserState::MediaAttributes => "media key/attributes",
        }
    }

    fn row(self) -> &'static Row {
        let row = &GRAMMAR[self as usize];
        debug_assert_eq!(row.state, self);
        row
    }

    /// Whether input may end cleanly in this state
    pub fn accepts_end_of_input(self) -> bool {
        self.row().missing.is_none()
    }

    /// What the document still lacks when input ends in a non-terminal state
    pub fn expected(self) -> Option<&'static str> {
        self.row().missing
    }

    /// Handler for `key` in this state, `None` when the line is out of order
    pub fn transition(self, key: LineKey) -> Option<Handler> {
        self.row()
            .transitions
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, handler)| *handler)
    }

    /// Line types accepted in this state, in table order
    pub fn legal_keys(self) -> impl Iterator<Item = LineKey> {
        self.row().transitions.iter().map(|(key, _)| *key)
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder selected by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Version,
    Origin,
    SessionName,
    SessionInformation,
    Uri,
    Email,
    Phone,
    SessionConnection,
    SessionBandwidth,
    Timing,
    RepeatTimes,
    TimeZones,
    SessionEncryptionKey,
    SessionAttribute,
    Media,
    MediaTitle,
    MediaConnection,
    MediaBandwidth,
    MediaEncryptionKey,
    MediaAttribute,
}

impl Handler {
    /// State the parser is in after this handler has consumed its line
    pub fn next_state(self) -> ParserState {
        match self {
            Handler::Version => ParserState::Version,
            Handler::Origin => ParserState::Origin,
            Handler::SessionName => ParserState::SessionName,
            Handler::SessionInformation => ParserState::SessionInformation,
            Handler::Uri => ParserState::Uri,
            Handler::Email => ParserState::Email,
            Handler::Phone => ParserState::Phone,
            Handler::SessionConnection | Handler::SessionBandwidth => ParserState::SessionBandwidth,
            Handler::Timing | Handler::RepeatTimes => ParserState::Timing,
            Handler::TimeZones => ParserState::TimeZones,
            Handler::SessionEncryptionKey | Handler::SessionAttribute => {
                ParserState::SessionAttributes
            }
            Handler::Media => ParserState::Media,
            Handler::MediaTitle => ParserState::MediaTitle,
            Handler::MediaConnection | Handler::MediaBandwidth => ParserState::MediaBandwidth,
            Handler::MediaEncryptionKey | Handler::MediaAttribute => ParserState::MediaAttributes,
        }
    }
}

struct Row {
    state: ParserState,
    transitions: &'static [(LineKey, Handler)],
    /// `None` for terminal states, otherwise what is still missing
    missing: Option<&'static str>,
}

use Handler as H;
use LineKey as K;

static GRAMMAR: [Row; 16] = [
    Row {
        state: ParserState::Start,
        transitions: &[(K::Version, H::Version)],
        missing: Some("version line"),
    },
    Row {
        state: ParserState::Version,
        transitions: &[(K::Origin, H::Origin)],
        missing: Some("origin line"),
    },
    Row {
        state: ParserState::Origin,
        transitions: &[(K::SessionName, H::SessionName)],
        missing: Some("session name line"),
    },
    Row {
        state: ParserState::SessionName,
        transitions: &[
            (K::Information, H::SessionInformation),
            (K::Uri, H::Uri),
            (K::Email, H::Email),
            (K::Phone, H::Phone),
            (K::Connection, H::SessionConnection),
            (K::Bandwidth, H::SessionBandwidth),
            (K::Timing, H::Timing),
        ],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::SessionInformation,
        transitions: &[
            (K::Uri, H::Uri),
            (K::Email, H::Email),
            (K::Phone, H::Phone),
            (K::Connection, H::SessionConnection),
            (K::Bandwidth, H::SessionBandwidth),
            (K::Timing, H::Timing),
        ],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::Uri,
        transitions: &[
            (K::Email, H::Email),
            (K::Phone, H::Phone),
            (K::Connection, H::SessionConnection),
            (K::Bandwidth, H::SessionBandwidth),
            (K::Timing, H::Timing),
        ],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::Email,
        transitions: &[
            (K::Phone, H::Phone),
            (K::Connection, H::SessionConnection),
            (K::Bandwidth, H::SessionBandwidth),
            (K::Timing, H::Timing),
        ],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::Phone,
        transitions: &[
            (K::Connection, H::SessionConnection),
            (K::Bandwidth, H::SessionBandwidth),
            (K::Timing, H::Timing),
        ],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::SessionBandwidth,
        transitions: &[(K::Bandwidth, H::SessionBandwidth), (K::Timing, H::Timing)],
        missing: Some("timing line"),
    },
    Row {
        state: ParserState::Timing,
        transitions: &[
            (K::RepeatTimes, H::RepeatTimes),
            (K::Timing, H::Timing),
            (K::TimeZones, H::TimeZones),
            (K::EncryptionKey, H::SessionEncryptionKey),
            (K::Attribute, H::SessionAttribute),
            (K::Media, H::Media),
        ],
        missing: None,
    },
    Row {
        state: ParserState::TimeZones,
        transitions: &[
            (K::EncryptionKey, H::SessionEncryptionKey),
            (K::Attribute, H::SessionAttribute),
            (K::Media, H::Media),
        ],
        missing: None,
    },
    Row {
        state: ParserState::SessionAttributes,
        transitions: &[(K::Attribute, H::SessionAttribute), (K::Media, H::Media)],
        missing: None,
    },
    Row {
        state: ParserState::Media,
        transitions: &[
            (K::Information, H::MediaTitle),
            (K::Connection, H::MediaConnection),
            (K::Bandwidth, H::MediaBandwidth),
            (K::EncryptionKey, H::MediaEncryptionKey),
            (K::Attribute, H::MediaAttribute),
            (K::Media, H::Media),
        ],
        missing: None,
    },
    Row {
        state: ParserState::MediaTitle,
        transitions: &[
            (K::Connection, H::MediaConnection),
            (K::Bandwidth, H::MediaBandwidth),
            (K::EncryptionKey, H::MediaEncryptionKey),
            (K::Attribute, H::MediaAttribute),
            (K::Media, H::Media),
        ],
        missing: None,
    },
    Row {
        state: ParserState::MediaBandwidth,
        transitions: &[
            (K::Bandwidth, H::MediaBandwidth),
            (K::EncryptionKey, H::MediaEncryptionKey),
            (K::Attribute, H::MediaAttribute),
            (K::Media, H::Media),
        ],
        missing: None,
    },
    Row {
        state: ParserState::MediaAttributes,
        transitions: &[(K::Attribute, H::MediaAttribute), (K::Media, H::Media)],
        missing: None,
    },
];
