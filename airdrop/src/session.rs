//! The wallet session: connected credential, display balance, and the
//! guards that keep concurrent batches and stale ticks honest.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bgeo_gateway::{BalanceService, WalletSigner};
use bgeo_types::{Address, Amount};
use bgeo_vault::{
    cipher, clear_credential, load_credential, save_credential, Credential, CredentialStore,
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::error::AirdropError;

/// One wallet session.
///
/// Holds the persisted credential (if connected), the last masked balance for
/// display, and two pieces of bookkeeping: an epoch counter that invalidates
/// work started under an earlier connection, and an in-flight flag that keeps
/// batches serialized.
pub struct WalletSession {
    store: Arc<dyn CredentialStore>,
    signer: Arc<dyn WalletSigner>,
    oracle: Arc<dyn BalanceService>,
    credential: RwLock<Option<Credential>>,
    balance: RwLock<Amount>,
    epoch: AtomicU64,
    in_flight: AtomicBool,
}

impl WalletSession {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        signer: Arc<dyn WalletSigner>,
        oracle: Arc<dyn BalanceService>,
    ) -> Self {
        Self {
            store,
            signer,
            oracle,
            credential: RwLock::new(None),
            balance: RwLock::new(Amount::zero()),
            epoch: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Derive a wallet from `mnemonic`, encrypt its private key under
    /// `password`, persist the credential, and fetch an initial balance.
    ///
    /// Every failure on this path collapses to
    /// [`AirdropError::WalletConnection`]; the caller only needs to know the
    /// connection did not happen.
    pub async fn connect(&self, mnemonic: &str, password: &str) -> Result<(), AirdropError> {
        let wallet = self
            .signer
            .derive_wallet(mnemonic)
            .await
            .map_err(|e| AirdropError::WalletConnection(e.to_string()))?;

        let sealed = cipher::seal(&wallet.private_key, password)
            .map_err(|e| AirdropError::WalletConnection(e.to_string()))?;
        let credential = Credential::new(sealed, wallet.address.clone());

        save_credential(self.store.as_ref(), &credential)
            .map_err(|e| AirdropError::WalletConnection(e.to_string()))?;

        *self.credential.write().await = Some(credential);
        self.bump_epoch();
        info!(address = %wallet.address, "wallet connected");

        self.update_balance().await;
        Ok(())
    }

    /// Restore a previously persisted credential, if one exists.
    ///
    /// Returns whether a wallet was restored. The balance stays at "0" until
    /// the caller asks for a refresh.
    pub async fn restore(&self) -> Result<bool, AirdropError> {
        match load_credential(self.store.as_ref())? {
            Some(credential) => {
                info!(address = %credential.address, "wallet restored from store");
                *self.credential.write().await = Some(credential);
                self.bump_epoch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forget the wallet: clear the persisted record, drop the in-memory
    /// credential, and reset the display balance. Idempotent.
    pub async fn disconnect(&self) -> Result<(), AirdropError> {
        clear_credential(self.store.as_ref())?;
        *self.credential.write().await = None;
        *self.balance.write().await = Amount::zero();
        self.bump_epoch();
        info!("wallet disconnected");
        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// The connected address, if any.
    pub async fn address(&self) -> Option<Address> {
        self.credential
            .read()
            .await
            .as_ref()
            .map(|c| c.address.clone())
    }

    /// The last fetched balance. "0" when unknown or not connected.
    pub async fn balance(&self) -> Amount {
        self.balance.read().await.clone()
    }

    /// Decrypt the stored private key with `password`.
    ///
    /// The cipher does not authenticate, so a success here does not prove the
    /// password: an unlucky wrong password can decrypt to garbage that still
    /// fails at the signer. Most wrong passwords are caught as
    /// [`AirdropError::InvalidPassword`].
    pub async fn decrypted_private_key(
        &self,
        password: &str,
    ) -> Result<Zeroizing<String>, AirdropError> {
        let credential = self.credential.read().await;
        let credential = credential.as_ref().ok_or(AirdropError::NotConnected)?;
        cipher::open(&credential.encrypted_private_key, password)
            .map_err(|_| AirdropError::InvalidPassword)
    }

    /// Fetch the current balance and store it for display.
    ///
    /// Fetch failures are masked as "0" rather than surfaced; the balance is
    /// advisory. No-op when no wallet is connected.
    pub async fn update_balance(&self) {
        let Some(address) = self.address().await else {
            return;
        };
        let balance = match self.oracle.balance(&address).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!(address = %address, "balance fetch failed, showing 0: {e}");
                Amount::zero()
            }
        };
        *self.balance.write().await = balance;
    }

    /// The current session epoch. Bumped on connect, restore, and disconnect
    /// so work started under an earlier wallet can detect it is stale.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether a batch is currently running on this session.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the single in-flight slot. The returned guard releases it.
    pub(crate) fn begin_airdrop(&self) -> Result<InFlightGuard<'_>, AirdropError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AirdropError::AlreadyInFlight);
        }
        Ok(InFlightGuard { session: self })
    }

    pub(crate) fn oracle(&self) -> Arc<dyn BalanceService> {
        Arc::clone(&self.oracle)
    }

    pub(crate) fn signer(&self) -> Arc<dyn WalletSigner> {
        Arc::clone(&self.signer)
    }
}

/// Releases the in-flight slot when the batch finishes, on every exit path.
pub(crate) struct InFlightGuard<'a> {
    session: &'a WalletSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::SeqCst);
    }
}
