use ecsctl_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regions the tool knows how to talk to.
///
/// The wire value is the region code (`ap-southeast-5`); [`Region::label`]
/// is the short form shown to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Singapore.
    #[serde(rename = "ap-southeast-1")]
    ApSoutheast1,
    /// Kuala Lumpur.
    #[serde(rename = "ap-southeast-3")]
    ApSoutheast3,
    /// Jakarta.
    #[serde(rename = "ap-southeast-5")]
    ApSoutheast5,
}

impl Region {
    /// All supported regions, in menu order.
    pub const ALL: [Region; 3] = [
        Region::ApSoutheast1,
        Region::ApSoutheast3,
        Region::ApSoutheast5,
    ];

    /// The region code sent as the `RegionId` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::ApSoutheast1 => "ap-southeast-1",
            Region::ApSoutheast3 => "ap-southeast-3",
            Region::ApSoutheast5 => "ap-southeast-5",
        }
    }

    /// Short display label for operator-facing output.
    pub fn label(&self) -> &'static str {
        match self {
            Region::ApSoutheast1 => "SG",
            Region::ApSoutheast3 => "MY",
            Region::ApSoutheast5 => "ID",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::config_invalid(format!("unsupported region: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_label() {
        let r: Region = "ap-southeast-5".parse().unwrap();
        assert_eq!(r, Region::ApSoutheast5);
        assert_eq!(r.label(), "ID");
        assert_eq!(r.to_string(), "ap-southeast-5");
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "us-east-1".parse::<Region>().unwrap_err();
        assert_eq!(err.kind(), ecsctl_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_serde_uses_region_code() {
        let json = serde_json::to_string(&Region::ApSoutheast3).unwrap();
        assert_eq!(json, "\"ap-southeast-3\"");
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Region::ApSoutheast3);
    }
}
