//! Batch transaction records.

use crate::address::Address;
use crate::amount::Amount;
use crate::hash::TxHash;
use crate::state::DeliveryStatus;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// One parsed recipient line: where to send and how much.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipientEntry {
    pub address: Address,
    pub amount: Amount,
}

impl RecipientEntry {
    pub fn new(address: Address, amount: Amount) -> Self {
        Self { address, amount }
    }
}

/// A recipient together with its delivery status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipientOutcome {
    pub address: Address,
    pub amount: Amount,
    pub status: DeliveryStatus,
}

impl RecipientOutcome {
    /// Wrap a recipient entry with an initial status.
    pub fn with_status(entry: RecipientEntry, status: DeliveryStatus) -> Self {
        Self {
            address: entry.address,
            amount: entry.amount,
            status,
        }
    }
}

/// A submitted batch transaction and the recipients it carries.
///
/// Created the instant the broadcast gateway returns a transaction hash,
/// with every status `Pending`. Only the confirmation poller moves it from
/// there; all recipients share the one chain transaction and transition
/// together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropTransaction {
    pub tx_hash: TxHash,
    pub timestamp: Timestamp,
    pub status: DeliveryStatus,
    pub recipients: Vec<RecipientOutcome>,
}

impl AirdropTransaction {
    /// Create a pending transaction record for a just-submitted batch.
    pub fn pending(tx_hash: TxHash, recipients: Vec<RecipientEntry>) -> Self {
        Self {
            tx_hash,
            timestamp: Timestamp::now(),
            status: DeliveryStatus::Pending,
            recipients: recipients
                .into_iter()
                .map(|entry| RecipientOutcome::with_status(entry, DeliveryStatus::Pending))
                .collect(),
        }
    }

    /// Move the transaction and every recipient to `status` at once.
    pub fn transition_all(&mut self, status: DeliveryStatus) {
        self.status = status;
        for recipient in &mut self.recipients {
            recipient.status = status;
        }
    }
}
