//! Network addressing, bandwidth and key lines (`c=`, `b=`, `k=`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Network type. Only `IN` (Internet) is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    In,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::In => f.write_str("IN"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(NetworkType::In),
            _ => Err(FieldError::syntax(format!("unsupported network type '{s}'"))),
        }
    }
}

/// Address family of a connection or origin address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    Ip4,
    Ip6,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressType::Ip4 => f.write_str("IP4"),
            AddressType::Ip6 => f.write_str("IP6"),
        }
    }
}

impl FromStr for AddressType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IP4" => Ok(AddressType::Ip4),
            "IP6" => Ok(AddressType::Ip6),
            _ => Err(FieldError::syntax(format!("unsupported address type '{s}'"))),
        }
    }
}

/// Multicast qualifier trailing a connection address.
///
/// A TTL only exists for IPv4 and a group count only for IPv6, so a single
/// slot holds whichever one the address family allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressQualifier {
    #[default]
    None,
    /// `<addr>/<ttl>` (IPv4)
    Ttl(u8),
    /// `<addr>/<number of addresses>` (IPv6)
    Range(u32),
}

/// Connection address with its optional multicast qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub qualifier: AddressQualifier,
}

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Address {
            address: address.into(),
            qualifier: AddressQualifier::None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)?;
        match self.qualifier {
            AddressQualifier::None => Ok(()),
            AddressQualifier::Ttl(ttl) => write!(f, "/{ttl}"),
            AddressQualifier::Range(range) => write!(f, "/{range}"),
        }
    }
}

/// `c=<nettype> <addrtype> <connection-address>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionData {
    pub net_type: NetworkType,
    pub addr_type: AddressType,
    pub address: Address,
}

impl ConnectionData {
    pub fn ip4(address: impl Into<String>) -> Self {
        ConnectionData {
            net_type: NetworkType::In,
            addr_type: AddressType::Ip4,
            address: Address::new(address),
        }
    }

    pub fn ip6(address: impl Into<String>) -> Self {
        ConnectionData {
            net_type: NetworkType::In,
            addr_type: AddressType::Ip6,
            address: Address::new(address),
        }
    }

    pub fn with_qualifier(mut self, qualifier: AddressQualifier) -> Self {
        self.address.qualifier = qualifier;
        self
    }
}

impl fmt::Display for ConnectionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.net_type, self.addr_type, self.address)
    }
}

/// `b=[X-]<bwtype>:<bandwidth>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bandwidth {
    /// Type carried an `X-` prefix and is not checked against the registry
    pub experimental: bool,
    /// Type token without the `X-` prefix
    pub bandwidth_type: String,
    pub value: u64,
}

impl Bandwidth {
    pub fn new(bandwidth_type: impl Into<String>, value: u64) -> Self {
        Bandwidth {
            experimental: false,
            bandwidth_type: bandwidth_type.into(),
            value,
        }
    }

    pub fn experimental(bandwidth_type: impl Into<String>, value: u64) -> Self {
        Bandwidth {
            experimental: true,
            ..Bandwidth::new(bandwidth_type, value)
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.experimental {
            f.write_str("X-")?;
        }
        write!(f, "{}:{}", self.bandwidth_type, self.value)
    }
}

/// Key delivery method of a `k=` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyMethod {
    Clear,
    Base64,
    Uri,
    Prompt,
}

impl fmt::Display for KeyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyMethod::Clear => "clear",
            KeyMethod::Base64 => "base64",
            KeyMethod::Uri => "uri",
            KeyMethod::Prompt => "prompt",
        })
    }
}

impl FromStr for KeyMethod {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => Ok(KeyMethod::Clear),
            "base64" => Ok(KeyMethod::Base64),
            "uri" => Ok(KeyMethod::Uri),
            "prompt" => Ok(KeyMethod::Prompt),
            _ => Err(FieldError::syntax(format!("unsupported key method '{s}'"))),
        }
    }
}

/// `k=<method>[:<encryption key>]` (obsolete in RFC 8866 but still parsed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncryptionKey {
    pub method: KeyMethod,
    pub key: Option<String>,
}

impl fmt::Display for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method)?;
        if let Some(key) = &self.key {
            write!(f, ":{key}")?;
        }
        Ok(())
    }
}
