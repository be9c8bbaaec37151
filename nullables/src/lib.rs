//! Nullable collaborators for deterministic testing.
//!
//! The airdrop pipeline's external dependencies (the gateway service, the
//! credential store) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic, scriptable values
//! - Record what was asked of them for assertions
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod gateway;
pub mod store;

pub use gateway::{NullBalanceService, NullWalletSigner, RecordedSubmission};
pub use store::NullCredentialStore;
