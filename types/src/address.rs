//! Chain address type.

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque BGEO chain address.
///
/// The chain's address format is owned by the remote gateway, so no checksum
/// or prefix validation happens here. The only local invariant is that an
/// address is never empty after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse an address from raw input, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let addr = Address::parse("  bgeo1qxy2k  ").unwrap();
        assert_eq!(addr.as_str(), "bgeo1qxy2k");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Address::parse(""), Err(TypeError::EmptyAddress));
        assert_eq!(Address::parse("   "), Err(TypeError::EmptyAddress));
    }

    #[test]
    fn serializes_as_plain_string() {
        let addr = Address::parse("bgeo1qxy2k").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"bgeo1qxy2k\"");
    }
}
