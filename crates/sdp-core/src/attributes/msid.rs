//! Media stream identification (RFC 8830)
//!
//! Format: a=msid:<stream id> [<app data>]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Msid {
    pub stream_id: String,
    /// Track identifier in the WebRTC usage
    pub app_data: Option<String>,
}

fn is_msid_char(c: char) -> bool {
    c.is_ascii_graphic()
}

impl FromStr for Msid {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(' ');
        let stream_id = parts.next().unwrap_or_default();
        let app_data = parts.next();
        let valid = |id: &str| !id.is_empty() && id.len() <= 64 && id.chars().all(is_msid_char);
        if !valid(stream_id) || !app_data.map_or(true, valid) || parts.next().is_some() {
            return Err(FieldError::syntax(format!("invalid a=msid value '{s}'")));
        }
        Ok(Msid {
            stream_id: stream_id.to_string(),
            app_data: app_data.map(str::to_string),
        })
    }
}

impl fmt::Display for Msid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stream_id)?;
        if let Some(app_data) = &self.app_data {
            write!(f, " {app_data}")?;
        }
        Ok(())
    }
}
