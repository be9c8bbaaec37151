//! Transaction hash type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transaction hash as reported by the broadcast gateway.
///
/// The gateway returns hashes as opaque strings; no length or alphabet is
/// enforced locally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Base URL of the public block explorer's transaction view.
    pub const EXPLORER_BASE: &'static str = "https://scan.bgeo.app/tx/";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated rendering for tables: the first 8 characters and an
    /// ellipsis, matching the explorer link text in the web wallet.
    pub fn short(&self) -> String {
        // Byte slicing below is only safe on ASCII strings.
        if self.0.len() <= 8 || !self.0.is_ascii() {
            return self.0.clone();
        }
        format!("{}...", &self.0[..8])
    }

    /// Link to this transaction on the public explorer.
    pub fn explorer_url(&self) -> String {
        format!("{}{}", Self::EXPLORER_BASE, self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
