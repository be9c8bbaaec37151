//! Fundamental types for the BGEO airdrop pipeline.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, transaction hashes, timestamps, and delivery statuses.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod state;
pub mod time;
pub mod transaction;

pub use address::Address;
pub use amount::Amount;
pub use error::TypeError;
pub use hash::TxHash;
pub use state::DeliveryStatus;
pub use time::Timestamp;
pub use transaction::{AirdropTransaction, RecipientEntry, RecipientOutcome};
