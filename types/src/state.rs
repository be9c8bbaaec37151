//! Delivery status for batches and recipients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The delivery state of a batch transaction or one of its recipients.
///
/// All recipients in a batch share one chain transaction, so they transition
/// together with the batch. A batch that exhausts its confirmation window is
/// left `Pending` rather than relabeled `Failed`: the transaction may still
/// be mining, and only a rejected submission is a known failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Submitted (or about to be submitted) and not yet confirmed.
    Pending,
    /// Balance movement observed; the batch is considered settled.
    Success,
    /// The submission itself was rejected; nothing reached the chain.
    Failed,
}

impl DeliveryStatus {
    /// Whether this status is final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}
