//! Nullable gateway: scriptable balances and recorded submissions.

use async_trait::async_trait;
use bgeo_gateway::{BalanceService, DerivedWallet, GatewayError, WalletSigner};
use bgeo_types::{Address, Amount, RecipientEntry, TxHash};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use zeroize::Zeroizing;

/// A balance oracle that replays scripted responses.
///
/// Each call pops the next queued response; once the queue is empty every
/// call returns the fallback balance. Calls are counted so tests can assert
/// exactly how many queries a poll sequence made.
pub struct NullBalanceService {
    responses: Mutex<VecDeque<Result<Amount, GatewayError>>>,
    fallback: Mutex<Amount>,
    calls: AtomicU32,
}

impl NullBalanceService {
    pub fn new(fallback: Amount) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            calls: AtomicU32::new(0),
        }
    }

    /// Queue one response for a future call.
    pub fn enqueue(&self, response: Result<Amount, GatewayError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue the same balance for `times` future calls.
    pub fn enqueue_repeated(&self, amount: Amount, times: usize) {
        let mut responses = self.responses.lock().unwrap();
        for _ in 0..times {
            responses.push_back(Ok(amount.clone()));
        }
    }

    /// Replace the fallback balance returned once the queue is drained.
    pub fn set_balance(&self, amount: Amount) {
        *self.fallback.lock().unwrap() = amount;
    }

    /// Number of balance queries made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceService for NullBalanceService {
    async fn balance(&self, _address: &Address) -> Result<Amount, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return response;
        }
        Ok(self.fallback.lock().unwrap().clone())
    }
}

/// One batch submission as seen by the nullable signer.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSubmission {
    pub from: Address,
    pub recipients: Vec<RecipientEntry>,
    pub private_key: String,
}

/// A signer that derives a fixed wallet and records every submission.
///
/// Derivation failures and submission outcomes can be scripted; with
/// nothing queued, derivation hands out the configured wallet and every
/// submission succeeds with the configured hash.
pub struct NullWalletSigner {
    address: Address,
    private_key: String,
    tx_hash: TxHash,
    derive_failures: Mutex<VecDeque<GatewayError>>,
    submit_results: Mutex<VecDeque<Result<TxHash, GatewayError>>>,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl NullWalletSigner {
    pub fn new() -> Self {
        Self::with_wallet("bgeo1nulladdress", "null-private-key")
    }

    /// Configure the wallet derivation hands out.
    pub fn with_wallet(address: &str, private_key: &str) -> Self {
        Self {
            address: Address::parse(address).expect("nullable wallet address"),
            private_key: private_key.to_string(),
            tx_hash: TxHash::new("0xnulltxhash"),
            derive_failures: Mutex::new(VecDeque::new()),
            submit_results: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Make the next `derive_wallet` call fail.
    pub fn fail_next_derive(&self, error: GatewayError) {
        self.derive_failures.lock().unwrap().push_back(error);
    }

    /// Queue the outcome of a future `submit_batch` call.
    pub fn enqueue_submit(&self, result: Result<TxHash, GatewayError>) {
        self.submit_results.lock().unwrap().push_back(result);
    }

    /// Everything submitted so far (for assertions).
    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Default for NullWalletSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletSigner for NullWalletSigner {
    async fn derive_wallet(&self, _mnemonic: &str) -> Result<DerivedWallet, GatewayError> {
        if let Some(error) = self.derive_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(DerivedWallet {
            address: self.address.clone(),
            private_key: Zeroizing::new(self.private_key.clone()),
        })
    }

    async fn submit_batch(
        &self,
        from: &Address,
        recipients: &[RecipientEntry],
        private_key: &str,
    ) -> Result<TxHash, GatewayError> {
        self.submissions.lock().unwrap().push(RecordedSubmission {
            from: from.clone(),
            recipients: recipients.to_vec(),
            private_key: private_key.to_string(),
        });
        if let Some(result) = self.submit_results.lock().unwrap().pop_front() {
            return result;
        }
        Ok(self.tx_hash.clone())
    }
}
