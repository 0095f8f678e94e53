//! Parser configuration

use serde::{Deserialize, Serialize};

/// What to do with an `a=` line whose name is not in the attribute registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributePolicy {
    /// Reject the document with [`Error::UnsupportedAttribute`](crate::Error::UnsupportedAttribute)
    Strict,
    /// Keep the line as [`Attribute::Unknown`](crate::Attribute::Unknown) and re-emit it verbatim
    Permissive,
}

impl Default for AttributePolicy {
    fn default() -> Self {
        if cfg!(feature = "lenient_parsing") {
            AttributePolicy::Permissive
        } else {
            AttributePolicy::Strict
        }
    }
}

/// Options controlling [`parse_with`](crate::parse_with).
///
/// Registered attributes used at the wrong level are rejected under every
/// policy; the policy only governs names the registry does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub attribute_policy: AttributePolicy,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict configuration regardless of the `lenient_parsing` feature
    pub fn strict() -> Self {
        ParserConfig {
            attribute_policy: AttributePolicy::Strict,
        }
    }

    /// Permissive configuration regardless of the `lenient_parsing` feature
    pub fn permissive() -> Self {
        ParserConfig {
            attribute_policy: AttributePolicy::Permissive,
        }
    }

    pub fn with_attribute_policy(mut self, policy: AttributePolicy) -> Self {
        self.attribute_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ParserConfig::new().with_attribute_policy(AttributePolicy::Permissive);
        assert_eq!(config, ParserConfig::permissive());
        assert_ne!(ParserConfig::strict(), ParserConfig::permissive());
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: ParserConfig =
            serde_json::from_str(r#"{"attribute_policy":"permissive"}"#).unwrap();
        assert_eq!(config.attribute_policy, AttributePolicy::Permissive);

        let config: ParserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[cfg(not(feature = "lenient_parsing"))]
    #[test]
    fn test_default_is_strict() {
        assert_eq!(ParserConfig::default().attribute_policy, AttributePolicy::Strict);
    }
}
