//! Source-specific media attributes (RFC 5576)
//!
//! Format: a=ssrc:<ssrc-id> <attribute>[:<value>]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::is_token;
use crate::error::{parse_uint, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ssrc {
    pub id: u32,
    /// Source attribute name, e.g. `cname` or `msid`
    pub attribute: String,
    pub value: Option<String>,
}

impl FromStr for Ssrc {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, source_attribute) = s
            .split_once(' ')
            .ok_or_else(|| FieldError::syntax(format!("invalid a=ssrc value '{s}'")))?;
        let id = parse_uint::<u32>("ssrc", id)?;
        let (attribute, value) = match source_attribute.split_once(':') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (source_attribute, None),
        };
        if !is_token(attribute) {
            return Err(FieldError::syntax(format!(
                "invalid ssrc attribute name '{attribute}'"
            )));
        }
        Ok(Ssrc {
            id,
            attribute: attribute.to_string(),
            value,
        })
    }
}

impl fmt::Display for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.attribute)?;
        if let Some(value) = &self.value {
            write!(f, ":{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssrc() {
        let ssrc: Ssrc = "3735928559 cname:user@example.com".parse().unwrap();
        assert_eq!(ssrc.id, 3735928559);
        assert_eq!(ssrc.attribute, "cname");
        assert_eq!(ssrc.value.as_deref(), Some("user@example.com"));

        let text = "1234 msid:stream track";
        assert_eq!(text.parse::<Ssrc>().unwrap().to_string(), text);

        let flag: Ssrc = "1234 previous-ssrc".parse().unwrap();
        assert_eq!(flag.value, None);

        assert!("cname:foo".parse::<Ssrc>().is_err());
        assert!("1234".parse::<Ssrc>().is_err());
        assert!(matches!(
            "4294967296 cname:x".parse::<Ssrc>(),
            Err(FieldError::Numeric { .. })
        ));
    }
}
