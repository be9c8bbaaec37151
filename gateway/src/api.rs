//! Service traits consumed by the airdrop pipeline.

use async_trait::async_trait;
use bgeo_types::{Address, Amount, RecipientEntry, TxHash};
use zeroize::Zeroizing;

use crate::error::GatewayError;

/// A wallet derived from a mnemonic by the remote signer.
///
/// Deliberately neither `Debug` nor `Clone`: the private key must not leak
/// into logs and must exist in exactly one place. The key buffer is zeroized
/// on drop.
pub struct DerivedWallet {
    pub address: Address,
    pub private_key: Zeroizing<String>,
}

/// Read-only balance queries.
#[async_trait]
pub trait BalanceService: Send + Sync {
    /// Fetch the current balance of `address`.
    async fn balance(&self, address: &Address) -> Result<Amount, GatewayError>;
}

/// The remote signing and broadcast capability.
///
/// Key derivation and transaction signing happen on the other side of this
/// trait; the pipeline never sees signing internals, only the plaintext key
/// it forwards exactly once per submission.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Derive the wallet (address and private key) for a mnemonic.
    async fn derive_wallet(&self, mnemonic: &str) -> Result<DerivedWallet, GatewayError>;

    /// Submit one batch transaction paying every recipient, returning the
    /// batch's transaction hash. All-or-nothing: there is no partial
    /// success.
    async fn submit_batch(
        &self,
        from: &Address,
        recipients: &[RecipientEntry],
        private_key: &str,
    ) -> Result<TxHash, GatewayError>;
}
