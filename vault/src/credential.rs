//! The persisted wallet credential record.

use bgeo_types::Address;
use serde::{Deserialize, Serialize};

/// The single persisted wallet record: encrypted private key plus plaintext
/// address.
///
/// Field names serialize in camelCase so the record stays interchangeable
/// with the web wallet's `wallet-data` entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub encrypted_private_key: String,
    pub address: Address,
}

impl Credential {
    pub fn new(encrypted_private_key: String, address: Address) -> Self {
        Self {
            encrypted_private_key,
            address,
        }
    }
}
