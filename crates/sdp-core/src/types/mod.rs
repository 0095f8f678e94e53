//! In-memory model of an SDP document

pub mod codec;
pub mod connection;
pub mod media;
pub mod session;

pub use codec::{Codec, CodecMap};
pub use connection::{
    Address, AddressQualifier, AddressType, Bandwidth, ConnectionData, EncryptionKey, KeyMethod,
    NetworkType,
};
pub use media::{MediaDescription, MediaName, MediaType, RangedPort};
pub use session::{Origin, RepeatTime, SessionDescription, TimeDescription, TimeZone, Timing};
