//! One airdrop run, end to end: decrypt, snapshot, submit, poll, report.

use bgeo_recipients::RecipientSet;
use bgeo_types::{AirdropTransaction, Amount, DeliveryStatus, RecipientOutcome};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cancel::CancelController;
use crate::error::AirdropError;
use crate::poller::{ConfirmationPoller, PollOutcome, PollProgress, PollerConfig};
use crate::session::WalletSession;

/// The terminal state of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The balance delta arrived inside the confirmation window.
    Confirmed { attempts: u32 },
    /// The window closed with the batch still pending on chain.
    TimedOut,
    /// Submission failed; no transaction exists. The message is the
    /// service's own words where it provided any.
    Rejected { message: String },
    /// The caller cancelled the confirmation watch.
    Cancelled,
    /// The session changed underneath the poll and the result was
    /// discarded.
    Superseded,
}

/// What one run produced: the transaction (when submission succeeded),
/// the per-recipient outcomes, and how the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct AirdropReport {
    pub transaction: Option<AirdropTransaction>,
    pub recipients: Vec<RecipientOutcome>,
    pub outcome: BatchOutcome,
}

/// Run one batch against the connected wallet.
///
/// The batch is all-or-nothing: every recipient rides the same chain
/// transaction, so they confirm together or fail together. Rejected
/// submissions and confirmation timeouts come back as a report, not an
/// error; errors mean the run could not start.
pub async fn run_airdrop(
    session: &WalletSession,
    recipients: &RecipientSet,
    password: &str,
    config: PollerConfig,
    cancel: &CancelController,
    progress: &watch::Sender<PollProgress>,
) -> Result<AirdropReport, AirdropError> {
    if recipients.is_empty() {
        return Err(AirdropError::NoRecipients);
    }

    let _in_flight = session.begin_airdrop()?;
    let address = session.address().await.ok_or(AirdropError::NotConnected)?;
    let epoch = session.epoch();
    // Subscribe before the slow parts so a cancel during submission is not
    // lost.
    let cancel_rx = cancel.subscribe();

    let private_key = session.decrypted_private_key(password).await?;

    // Snapshot the balance the confirmation poll will diff against. A
    // failed read masks to "0", same as the display path.
    let oracle = session.oracle();
    let baseline = match oracle.balance(&address).await {
        Ok(balance) => balance,
        Err(e) => {
            warn!("baseline balance fetch failed, using 0: {e}");
            Amount::zero()
        }
    };

    let entries = recipients.entries().to_vec();
    // The plaintext key crosses to the signer here and nowhere else; it is
    // dropped the moment the call returns.
    let submitted = session
        .signer()
        .submit_batch(&address, &entries, &private_key)
        .await;
    drop(private_key);

    let tx_hash = match submitted {
        Ok(tx_hash) => tx_hash,
        Err(e) => {
            let message = e.to_string();
            warn!(recipients = entries.len(), "batch rejected: {message}");
            let failed = entries
                .into_iter()
                .map(|entry| RecipientOutcome::with_status(entry, DeliveryStatus::Failed))
                .collect();
            return Ok(AirdropReport {
                transaction: None,
                recipients: failed,
                outcome: BatchOutcome::Rejected { message },
            });
        }
    };

    info!(tx_hash = %tx_hash, recipients = entries.len(), "batch submitted");
    let mut transaction = AirdropTransaction::pending(tx_hash, entries);

    let poller = ConfirmationPoller::new(oracle, config);
    let outcome = poller
        .wait_for_confirmation(&address, &baseline, cancel_rx, progress, || {
            session.epoch() == epoch
        })
        .await;

    let outcome = match outcome {
        PollOutcome::Confirmed { attempts } => {
            transaction.transition_all(DeliveryStatus::Success);
            session.update_balance().await;
            BatchOutcome::Confirmed { attempts }
        }
        PollOutcome::TimedOut => BatchOutcome::TimedOut,
        PollOutcome::Cancelled => BatchOutcome::Cancelled,
        PollOutcome::Superseded => BatchOutcome::Superseded,
    };

    Ok(AirdropReport {
        recipients: transaction.recipients.clone(),
        transaction: Some(transaction),
        outcome,
    })
}
