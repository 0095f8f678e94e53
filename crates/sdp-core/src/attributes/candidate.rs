//! ICE candidate attributes (RFC 8839)
//!
//! Format: a=candidate:<foundation> <component-id> <transport> <priority>
//! <conn-addr> <port> typ <cand-type> [raddr <raddr>] [rport <rport>] *(<name> <value>)
//!
//! Format: a=remote-candidates:<component-id> <conn-addr> <port> ...

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::{is_ice_char, is_token};
use crate::error::{parse_uint, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateType {
    Host,
    ServerReflexive,
    PeerReflexive,
    Relay,
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relay => "relay",
        })
    }
}

impl FromStr for CandidateType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(CandidateType::Host),
            "srflx" => Ok(CandidateType::ServerReflexive),
            "prflx" => Ok(CandidateType::PeerReflexive),
            "relay" => Ok(CandidateType::Relay),
            _ => Err(FieldError::syntax(format!("invalid candidate type '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub foundation: String,
    pub component: u16,
    /// Kept as written (`UDP`, `udp`, `TCP`)
    pub transport: String,
    pub priority: u32,
    pub address: String,
    pub port: u16,
    pub candidate_type: CandidateType,
    pub related_address: Option<String>,
    pub related_port: Option<u16>,
    /// Extension name/value pairs such as `generation 0` or `tcptype active`
    pub extensions: Vec<(String, String)>,
}

impl Candidate {
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl FromStr for Candidate {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() < 8 {
            return Err(FieldError::syntax(format!(
                "invalid a=candidate value '{s}': insufficient parts"
            )));
        }

        let foundation = parts[0];
        if foundation.len() > 32 || !foundation.chars().all(is_ice_char) || foundation.is_empty() {
            return Err(FieldError::syntax(format!("invalid candidate foundation '{foundation}'")));
        }
        let component = parse_uint::<u16>("candidate component id", parts[1])?;
        if !(1..=256).contains(&component) {
            return Err(FieldError::syntax(format!("invalid candidate component id '{component}'")));
        }
        let transport = parts[2];
        if !transport.eq_ignore_ascii_case("udp") && !transport.eq_ignore_ascii_case("tcp") {
            return Err(FieldError::syntax(format!("invalid candidate transport '{transport}'")));
        }
        let priority = parse_uint::<u32>("candidate priority", parts[3])?;
        let address = parts[4].to_string();
        let port = parse_uint::<u16>("candidate port", parts[5])?;
        if parts[6] != "typ" {
            return Err(FieldError::syntax(format!(
                "expected 'typ' in candidate, found '{}'",
                parts[6]
            )));
        }
        let candidate_type = parts[7].parse()?;

        let mut candidate = Candidate {
            foundation: foundation.to_string(),
            component,
            transport: transport.to_string(),
            priority,
            address,
            port,
            candidate_type,
            related_address: None,
            related_port: None,
            extensions: Vec::new(),
        };

        for pair in parts[8..].chunks(2) {
            let [name, value] = pair else {
                return Err(FieldError::syntax(format!(
                    "candidate extension '{}' has no value",
                    pair[0]
                )));
            };
            match *name {
                "raddr" if candidate.related_address.is_none() && candidate.extensions.is_empty() => {
                    candidate.related_address = Some(value.to_string());
                }
                "rport" if candidate.related_port.is_none() && candidate.extensions.is_empty() => {
                    candidate.related_port = Some(parse_uint("candidate related port", value)?);
                }
                _ if is_token(name) => {
                    candidate.extensions.push((name.to_string(), value.to_string()));
                }
                _ => {
                    return Err(FieldError::syntax(format!("invalid candidate extension '{name}'")));
                }
            }
        }
        Ok(candidate)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.transport,
            self.priority,
            self.address,
            self.port,
            self.candidate_type
        )?;
        if let Some(raddr) = &self.related_address {
            write!(f, " raddr {raddr}")?;
        }
        if let Some(rport) = self.related_port {
            write!(f, " rport {rport}")?;
        }
        for (name, value) in &self.extensions {
            write!(f, " {name} {value}")?;
        }
        Ok(())
    }
}

/// One `<component-id> <connection-address> <port>` triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteCandidate {
    pub component: u16,
    pub address: String,
    pub port: u16,
}

pub(crate) fn parse_remote_candidates(s: &str) -> Result<Vec<RemoteCandidate>, FieldError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.is_empty() || parts.len() % 3 != 0 {
        return Err(FieldError::syntax(format!("invalid a=remote-candidates value '{s}'")));
    }
    parts
        .chunks(3)
        .map(|triple| {
            Ok(RemoteCandidate {
                component: parse_uint("remote candidate component id", triple[0])?,
                address: triple[1].to_string(),
                port: parse_uint("remote candidate port", triple[2])?,
            })
        })
        .collect()
}

impl fmt::Display for RemoteCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.component, self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_candidate() {
        let text = "1 1 UDP 2130706431 10.0.1.1 8998 typ host";
        let candidate: Candidate = text.parse().unwrap();
        assert_eq!(candidate.foundation, "1");
        assert_eq!(candidate.component, 1);
        assert_eq!(candidate.priority, 2130706431);
        assert_eq!(candidate.candidate_type, CandidateType::Host);
        assert_eq!(candidate.to_string(), text);
    }

    #[test]
    fn test_reflexive_candidate_with_extensions() {
        let text = "842163049 1 udp 1677729535 203.0.113.7 44323 typ srflx raddr 192.168.1.2 rport 44323 generation 0 network-cost 999";
        let candidate: Candidate = text.parse().unwrap();
        assert_eq!(candidate.transport, "udp");
        assert_eq!(candidate.related_address.as_deref(), Some("192.168.1.2"));
        assert_eq!(candidate.related_port, Some(44323));
        assert_eq!(candidate.extension("generation"), Some("0"));
        assert_eq!(candidate.extension("network-cost"), Some("999"));
        assert_eq!(candidate.to_string(), text);
    }

    #[test]
    fn test_invalid_candidates() {
        assert!("1 1 UDP 2130706431 10.0.1.1 8998 typ".parse::<Candidate>().is_err());
        assert!("1 1 SCTP 2130706431 10.0.1.1 8998 typ host".parse::<Candidate>().is_err());
        assert!("1 0 UDP 2130706431 10.0.1.1 8998 typ host".parse::<Candidate>().is_err());
        assert!("1 1 UDP 2130706431 10.0.1.1 99999 typ host".parse::<Candidate>().is_err());
        assert!("1 1 UDP 2130706431 10.0.1.1 8998 type host".parse::<Candidate>().is_err());
        assert!("1 1 UDP 2130706431 10.0.1.1 8998 typ nat".parse::<Candidate>().is_err());
        assert!("1 1 UDP 2130706431 10.0.1.1 8998 typ host generation".parse::<Candidate>().is_err());
    }

    #[test]
    fn test_remote_candidates() {
        let list = parse_remote_candidates("1 192.0.2.3 45664 2 192.0.2.3 45665").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].component, 2);
        assert_eq!(list[1].port, 45665);
        assert!(parse_remote_candidates("1 192.0.2.3").is_err());
        assert!(parse_remote_candidates("").is_err());
    }
}
