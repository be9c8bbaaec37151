//! Confirmation polling.
//!
//! The chain offers no per-transaction receipt lookup here, so settlement is
//! inferred from the sender's balance: snapshot it before submission, then
//! poll once a second and treat any change as confirmation of the batch.
//! A batch that never moves the balance inside the window stays `Pending`.

use std::sync::Arc;
use std::time::Duration;

use bgeo_gateway::BalanceService;
use bgeo_types::{Address, Amount};
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How many balance queries one confirmation window spends.
const MAX_ATTEMPTS: u32 = 300;

/// Delay between balance queries.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            interval: POLL_INTERVAL,
        }
    }
}

/// Snapshot of how far the confirmation window has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollProgress {
    pub attempts: u32,
    pub max_attempts: u32,
}

impl PollProgress {
    pub fn start(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
        }
    }

    /// Progress through the window as a percentage, for display.
    pub fn percent(&self) -> f64 {
        f64::from(self.attempts) / f64::from(self.max_attempts) * 100.0
    }
}

/// How one confirmation watch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The balance moved away from the baseline on this attempt.
    Confirmed { attempts: u32 },
    /// The window closed without a balance change. The batch may still
    /// settle later; nothing here says it failed.
    TimedOut,
    /// The caller cancelled the watch.
    Cancelled,
    /// The balance moved, but the session is no longer the one that
    /// submitted the batch. Nothing may act on this signal.
    Superseded,
}

/// Polls an address's balance until it departs from a baseline.
pub struct ConfirmationPoller {
    oracle: Arc<dyn BalanceService>,
    config: PollerConfig,
}

impl ConfirmationPoller {
    pub fn new(oracle: Arc<dyn BalanceService>, config: PollerConfig) -> Self {
        Self { oracle, config }
    }

    /// Watch `address` until its balance differs from `baseline`, the
    /// attempt budget runs out, or a cancel arrives.
    ///
    /// Every tick costs one attempt, including ticks where the balance
    /// query fails; a failed query is simply no signal. The comparison is
    /// on the rendered amount, so any change in either direction counts.
    /// `still_current` is consulted before a change is acted on; when it
    /// says no, the signal is discarded as [`PollOutcome::Superseded`].
    pub async fn wait_for_confirmation(
        &self,
        address: &Address,
        baseline: &Amount,
        mut cancel: broadcast::Receiver<()>,
        progress: &watch::Sender<PollProgress>,
        still_current: impl Fn() -> bool,
    ) -> PollOutcome {
        let mut attempts: u32 = 0;
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so every attempt
        // waits out a full interval.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.recv() => {
                    info!(attempts, "confirmation polling cancelled");
                    return PollOutcome::Cancelled;
                }
                _ = interval.tick() => {
                    attempts += 1;
                    match self.oracle.balance(address).await {
                        Ok(current) if current != *baseline => {
                            if !still_current() {
                                warn!(attempts, "balance changed but the session moved on, discarding");
                                return PollOutcome::Superseded;
                            }
                            info!(attempts, balance = %current, "balance changed, batch confirmed");
                            return PollOutcome::Confirmed { attempts };
                        }
                        Ok(_) => {}
                        Err(e) => {
                            debug!(attempts, "balance query failed, no signal this tick: {e}");
                        }
                    }
                    if attempts >= self.config.max_attempts {
                        warn!(attempts, "confirmation window exhausted, batch left pending");
                        return PollOutcome::TimedOut;
                    }
                    let _ = progress.send(PollProgress {
                        attempts,
                        max_attempts: self.config.max_attempts,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelController;
    use bgeo_gateway::GatewayError;
    use bgeo_nullables::NullBalanceService;

    fn amount(s: &str) -> Amount {
        Amount::parse(s).unwrap()
    }

    fn fast_config(max_attempts: u32) -> PollerConfig {
        PollerConfig {
            max_attempts,
            interval: Duration::from_millis(1),
        }
    }

    fn poller(oracle: &Arc<NullBalanceService>, max_attempts: u32) -> ConfirmationPoller {
        ConfirmationPoller::new(
            Arc::clone(oracle) as Arc<dyn BalanceService>,
            fast_config(max_attempts),
        )
    }

    // The controller must outlive the watch: a dropped sender closes the
    // broadcast channel and reads as an immediate cancel.
    fn harness(
        max_attempts: u32,
    ) -> (
        CancelController,
        broadcast::Receiver<()>,
        watch::Sender<PollProgress>,
    ) {
        let controller = CancelController::new();
        let cancel = controller.subscribe();
        let (progress, _) = watch::channel(PollProgress::start(max_attempts));
        (controller, cancel, progress)
    }

    #[tokio::test]
    async fn confirms_when_the_balance_moves() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        oracle.enqueue(Ok(amount("250")));
        let (_controller, cancel, progress) = harness(300);

        let outcome = poller(&oracle, 300)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::Confirmed { attempts: 1 });
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn change_on_the_final_attempt_still_confirms() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        oracle.enqueue_repeated(amount("100"), 299);
        oracle.enqueue(Ok(amount("92.5")));
        let (_controller, cancel, progress) = harness(300);

        let outcome = poller(&oracle, 300)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::Confirmed { attempts: 300 });
        assert_eq!(oracle.calls(), 300);
    }

    #[tokio::test]
    async fn spends_exactly_the_attempt_budget_before_timing_out() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        let (_controller, cancel, progress) = harness(300);

        let outcome = poller(&oracle, 300)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(oracle.calls(), 300);
    }

    #[tokio::test]
    async fn failed_queries_consume_attempts_without_confirming() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        oracle.enqueue(Err(GatewayError::Unreachable("down".into())));
        oracle.enqueue(Ok(amount("50")));
        let (_controller, cancel, progress) = harness(10);

        let outcome = poller(&oracle, 10)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::Confirmed { attempts: 2 });
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn only_errors_runs_the_window_to_timeout() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        oracle.enqueue(Err(GatewayError::Unreachable("down".into())));
        oracle.enqueue(Err(GatewayError::RequestFailed("500".into())));
        let (_controller, cancel, progress) = harness(2);

        let outcome = poller(&oracle, 2)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn cancel_stops_the_watch() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        let poller = ConfirmationPoller::new(
            Arc::clone(&oracle) as Arc<dyn BalanceService>,
            PollerConfig {
                max_attempts: 10_000,
                interval: Duration::from_millis(5),
            },
        );
        let controller = CancelController::new();
        let cancel = controller.subscribe();
        let (progress, _) = watch::channel(PollProgress::start(10_000));

        let handle = tokio::spawn(async move {
            let address = Address::parse("bgeo1a").unwrap();
            let baseline = amount("100");
            poller
                .wait_for_confirmation(&address, &baseline, cancel, &progress, || true)
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.cancel();

        assert_eq!(handle.await.unwrap(), PollOutcome::Cancelled);
    }

    #[tokio::test]
    async fn a_stale_session_turns_confirmation_into_superseded() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        oracle.enqueue(Ok(amount("1")));
        let (_controller, cancel, progress) = harness(300);

        let outcome = poller(&oracle, 300)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || false,
            )
            .await;

        assert_eq!(outcome, PollOutcome::Superseded);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn progress_reports_every_non_terminal_attempt() {
        let oracle = Arc::new(NullBalanceService::new(amount("100")));
        let controller = CancelController::new();
        let cancel = controller.subscribe();
        let (progress, progress_rx) = watch::channel(PollProgress::start(5));

        let outcome = poller(&oracle, 5)
            .wait_for_confirmation(
                &Address::parse("bgeo1a").unwrap(),
                &amount("100"),
                cancel,
                &progress,
                || true,
            )
            .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        // The final attempt is terminal, so the last report is 4 of 5.
        let last = *progress_rx.borrow();
        assert_eq!(
            last,
            PollProgress {
                attempts: 4,
                max_attempts: 5
            }
        );
        assert_eq!(last.percent(), 80.0);
    }
}
