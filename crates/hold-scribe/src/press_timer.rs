//! Elapsed-time accumulator tied to the press gesture.
//!
//! Purely observational: the elapsed value is logged and observable but
//! gates no recording logic.

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time};
use tracing::{debug, trace};

/// Fixed tick cadence for press-duration accounting.
pub const PRESS_TICK: Duration = Duration::from_millis(100);

/// Accumulates how long the record control has been held, on a fixed tick.
///
/// `start` resets elapsed to zero and installs a single tick task; starting
/// again while running cancels the prior task first, so two starts can never
/// double the cadence. `stop` freezes the last value until the next start.
pub struct PressTimer {
    elapsed_tx: watch::Sender<Duration>,
    ticker: Option<JoinHandle<()>>,
}

impl PressTimer {
    /// Create a stopped timer with zero elapsed.
    pub fn new() -> Self {
        let (elapsed_tx, _) = watch::channel(Duration::ZERO);
        Self {
            elapsed_tx,
            ticker: None,
        }
    }

    /// Reset elapsed to zero and begin ticking.
    ///
    /// Must run inside a tokio runtime. Cancels any prior tick task before
    /// installing the new one.
    pub fn start(&mut self) {
        if let Some(prior) = self.ticker.take() {
            prior.abort();
            debug!("Prior press ticker cancelled");
        }

        self.elapsed_tx.send_replace(Duration::ZERO);

        let elapsed_tx = self.elapsed_tx.clone();
        self.ticker = Some(tokio::spawn(async move {
            // interval() fires immediately; shift the first tick one cadence
            // out so elapsed lags the wall clock by at most one tick.
            let mut ticks = time::interval_at(time::Instant::now() + PRESS_TICK, PRESS_TICK);
            loop {
                ticks.tick().await;
                elapsed_tx.send_modify(|elapsed| *elapsed += PRESS_TICK);
                trace!(
                    elapsed_ms = elapsed_tx.borrow().as_millis(),
                    "Press duration tick"
                );
            }
        }));
    }

    /// Halt ticking, leaving the last elapsed value readable.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        debug!(
            elapsed_ms = self.elapsed().as_millis(),
            "Final press duration"
        );
    }

    /// The accumulated press duration.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed_tx.borrow()
    }

    /// Observe elapsed-time changes.
    pub fn subscribe(&self) -> watch::Receiver<Duration> {
        self.elapsed_tx.subscribe()
    }
}

impl Default for PressTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PressTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
