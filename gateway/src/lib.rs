//! HTTP client for the BGEO gateway service.
//!
//! The gateway is the single remote collaborator of the airdrop pipeline:
//! it derives wallets from mnemonics, reports balances, broadcasts batch
//! transactions, and proxies raw JSON-RPC calls. This crate defines the
//! service traits the pipeline consumes and the `reqwest` implementation
//! speaking the gateway's REST surface.

pub mod api;
pub mod client;
pub mod error;

pub use api::{BalanceService, DerivedWallet, WalletSigner};
pub use client::GatewayClient;
pub use error::GatewayError;
