//! Allow-lists for domain restricted SDP tokens

use crate::error::FieldError;

/// Transport protocol components accepted in `m=` lines.
///
/// A proto such as `UDP/TLS/RTP/SAVPF` is split on `/` and every component
/// must appear here.
pub const PROTOS: &[&str] = &[
    "UDP", "TCP", "RTP", "AVP", "SAVP", "SAVPF", "AVPF", "TLS", "DTLS", "SCTP", "udptl",
];

/// Registered `b=` modifiers (RFC 8866 CT/AS, RFC 3890 TIAS, RFC 3556 RS/RR)
pub const BANDWIDTH_TYPES: &[&str] = &["CT", "AS", "TIAS", "RS", "RR"];

/// Split and validate an `m=` transport protocol
pub fn parse_protos(proto: &str) -> Result<Vec<String>, FieldError> {
    proto
        .split('/')
        .map(|component| {
            if PROTOS.contains(&component) {
                Ok(component.to_string())
            } else {
                Err(FieldError::syntax(format!(
                    "unsupported transport protocol '{component}' in '{proto}'"
                )))
            }
        })
        .collect()
}

pub fn validate_bandwidth_type(bandwidth_type: &str) -> Result<(), FieldError> {
    if BANDWIDTH_TYPES.contains(&bandwidth_type) {
        Ok(())
    } else {
        Err(FieldError::syntax(format!(
            "unsupported bandwidth type '{bandwidth_type}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protos() {
        assert_eq!(parse_protos("RTP/AVP").unwrap(), vec!["RTP", "AVP"]);
        assert_eq!(parse_protos("UDP/TLS/RTP/SAVPF").unwrap().len(), 4);
        assert!(parse_protos("UDP/DTLS/SCTP").is_ok());
        assert!(parse_protos("udptl").is_ok());
        assert!(parse_protos("RTP/XYZ").is_err());
        assert!(parse_protos("rtp/avp").is_err());
        assert!(parse_protos("RTP//AVP").is_err());
    }

    #[test]
    fn test_bandwidth_types() {
        for registered in BANDWIDTH_TYPES {
            assert!(validate_bandwidth_type(registered).is_ok());
        }
        assert!(validate_bandwidth_type("as").is_err());
        assert!(validate_bandwidth_type("XYZ").is_err());
    }
}
