//! Decoders for `c=`, `b=` and `k=` lines

use crate::error::{parse_uint, FieldError};
use crate::parser::lexer::Lexer;
use crate::parser::validation::validate_bandwidth_type;
use crate::types::{
    Address, AddressQualifier, AddressType, Bandwidth, ConnectionData, EncryptionKey, KeyMethod,
};

/// `c=<nettype> <addrtype> <connection-address>`
///
/// IPv4 addresses may carry `/<ttl>`, IPv6 addresses `/<number of addresses>`.
pub fn parse_connection(lexer: &mut Lexer<'_>) -> Result<ConnectionData, FieldError> {
    let net_type = lexer.expect_field("connection network type")?.parse()?;
    let addr_type = lexer.expect_field("connection address type")?.parse()?;
    let text = lexer.expect_field("connection address")?;
    let address = parse_address(addr_type, text)?;
    Ok(ConnectionData {
        net_type,
        addr_type,
        address,
    })
}

fn parse_address(addr_type: AddressType, text: &str) -> Result<Address, FieldError> {
    let mut parts = text.split('/');
    let address = parts.next().unwrap_or_default();
    if address.is_empty() {
        return Err(FieldError::syntax(format!("invalid connection address '{text}'")));
    }
    let qualifier = match (parts.next(), addr_type) {
        (None, _) => AddressQualifier::None,
        (Some(ttl), AddressType::Ip4) => AddressQualifier::Ttl(parse_uint("ttl", ttl)?),
        (Some(range), AddressType::Ip6) => {
            AddressQualifier::Range(parse_uint("address count", range)?)
        }
    };
    if parts.next().is_some() {
        return Err(FieldError::syntax(format!(
            "connection address '{text}' has more than one qualifier"
        )));
    }
    Ok(Address {
        address: address.to_string(),
        qualifier,
    })
}

/// `b=[X-]<bwtype>:<bandwidth>`
pub fn parse_bandwidth(lexer: &mut Lexer<'_>) -> Result<Bandwidth, FieldError> {
    let text = lexer.expect_field("bandwidth")?;
    let (kind, value) = text
        .split_once(':')
        .ok_or_else(|| FieldError::syntax(format!("invalid bandwidth '{text}'")))?;
    let (experimental, bandwidth_type) = match kind.strip_prefix("X-") {
        Some(kind) => (true, kind),
        None => (false, kind),
    };
    if bandwidth_type.is_empty() {
        return Err(FieldError::syntax(format!("invalid bandwidth '{text}'")));
    }
    if !experimental {
        validate_bandwidth_type(bandwidth_type)?;
    }
    Ok(Bandwidth {
        experimental,
        bandwidth_type: bandwidth_type.to_string(),
        value: parse_uint("bandwidth", value)?,
    })
}

/// `k=<method>[:<encryption key>]`
pub fn parse_encryption_key(lexer: &mut Lexer<'_>) -> Result<EncryptionKey, FieldError> {
    let text = lexer.read_line();
    let (method, key) = match text.split_once(':') {
        Some((method, key)) => (method, Some(key)),
        None => (text, None),
    };
    let method: KeyMethod = method.parse()?;
    match (method, key) {
        (KeyMethod::Prompt, None) => {}
        (KeyMethod::Prompt, Some(_)) => {
            return Err(FieldError::syntax("k=prompt does not take a key"));
        }
        (_, None) | (_, Some("")) => {
            return Err(FieldError::syntax(format!("k={method} requires a key")));
        }
        _ => {}
    }
    Ok(EncryptionKey {
        method,
        key: key.map(str::to_string),
    })
}
