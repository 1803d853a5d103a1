use crate::metrics::poller::{PollOutcome, Poller};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Inactive,
    Active,
}

struct ScheduleHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Auto-refresh timer. Holds at most one ticking task; each tick spawns an
/// independent poll so stopping the timer never aborts a fetch in flight.
pub struct RefreshScheduler {
    period: Duration,
    handle: Option<ScheduleHandle>,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> RefreshState {
        if self.is_active() {
            RefreshState::Active
        } else {
            RefreshState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn toggle(
        &mut self,
        poller: &Arc<Poller>,
        tx: &UnboundedSender<PollOutcome>,
    ) -> RefreshState {
        if self.is_active() {
            self.stop();
        } else {
            self.start(poller, tx);
        }
        self.state()
    }

    /// Starts ticking. Returns `false` without touching the running timer
    /// when one is already active.
    pub fn start(&mut self, poller: &Arc<Poller>, tx: &UnboundedSender<PollOutcome>) -> bool {
        if self.is_active() {
            return false;
        }

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let poller = Arc::clone(poller);
        let tx = tx.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // A stop that lands on a tick boundary must win over the tick.
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        tracing::trace!("auto-refresh tick");
                        poller.spawn_poll(tx.clone());
                    }
                }
            }
        });

        tracing::info!(period = ?self.period, "auto-refresh started");
        self.handle = Some(ScheduleHandle {
            stop: stop_tx,
            task,
        });
        true
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.stop.send(()).is_err() {
                handle.task.abort();
            }
            tracing::info!("auto-refresh stopped");
        }
    }

    /// Status text for the header: `On (5s)` / `Off`.
    pub fn status_label(&self) -> String {
        if self.is_active() {
            format!("On ({})", humantime::format_duration(self.period))
        } else {
            "Off".to_string()
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.task.abort();
        }
    }
}
