//! Batch send pipeline for BGEO airdrops.
//!
//! Ties the other crates together: a [`WalletSession`] holds the encrypted
//! credential and display balance, [`run_airdrop`] pushes one recipient batch
//! through submission, and a [`ConfirmationPoller`] watches the sender balance
//! for the delta that signals the batch settled on chain.

pub mod batch;
pub mod cancel;
pub mod error;
pub mod poller;
pub mod session;

pub use batch::{run_airdrop, AirdropReport, BatchOutcome};
pub use cancel::CancelController;
pub use error::AirdropError;
pub use poller::{ConfirmationPoller, PollOutcome, PollProgress, PollerConfig};
pub use session::WalletSession;
