//! Grouping attributes
//!
//! - `a=group:<semantics> *(SP <identification-tag>)` (RFC 5888)
//! - `a=msid-semantic:<semantics> [<token> ...]` (WebRTC legacy)
//! - `a=ssrc-group:<semantics> <ssrc-id> ...` (RFC 5576)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::is_token;
use crate::error::{parse_uint, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    /// `BUNDLE`, `LS`, `FID`, ...
    pub semantics: String,
    /// Identification tags; an empty group is legal
    pub mids: Vec<String>,
}

/// Split `<semantics> <item>*` and validate every piece as a token
fn semantics_and_tokens<'a>(attribute: &str, s: &'a str) -> Result<(&'a str, Vec<&'a str>), FieldError> {
    let mut parts = s.split_whitespace();
    let semantics = parts
        .next()
        .filter(|p| is_token(p))
        .ok_or_else(|| FieldError::syntax(format!("invalid a={attribute} value '{s}'")))?;
    let items: Vec<&str> = parts.collect();
    if let Some(bad) = items.iter().find(|item| !is_token(item)) {
        return Err(FieldError::syntax(format!("invalid a={attribute} tag '{bad}'")));
    }
    Ok((semantics, items))
}

impl FromStr for Group {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (semantics, mids) = semantics_and_tokens("group", s)?;
        Ok(Group {
            semantics: semantics.to_string(),
            mids: mids.into_iter().map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.semantics)?;
        for mid in &self.mids {
            write!(f, " {mid}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MsidSemantic {
    /// Usually `WMS`
    pub semantics: String,
    /// Media stream ids, or `*`
    pub identifiers: Vec<String>,
}

impl FromStr for MsidSemantic {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "a=msid-semantic: WMS stream" is common; leading space is tolerated
        let (semantics, identifiers) = semantics_and_tokens("msid-semantic", s.trim_start())?;
        Ok(MsidSemantic {
            semantics: semantics.to_string(),
            identifiers: identifiers.into_iter().map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for MsidSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.semantics)?;
        for id in &self.identifiers {
            write!(f, " {id}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SsrcGroup {
    /// `FID`, `FEC`, `SIM`, ...
    pub semantics: String,
    pub ssrcs: Vec<u32>,
}

impl FromStr for SsrcGroup {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (semantics, ids) = semantics_and_tokens("ssrc-group", s)?;
        if ids.is_empty() {
            return Err(FieldError::syntax(format!("a=ssrc-group:{s} lists no ssrc")));
        }
        let ssrcs = ids
            .into_iter()
            .map(|id| parse_uint::<u32>("ssrc", id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SsrcGroup {
            semantics: semantics.to_string(),
            ssrcs,
        })
    }
}

impl fmt::Display for SsrcGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.semantics)?;
        for ssrc in &self.ssrcs {
            write!(f, " {ssrc}")?;
        }
        Ok(())
    }
}
