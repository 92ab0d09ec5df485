//! Periodic background fetching.
//!
//! [`PeriodicWorker`] fires on a fixed wall-clock interval; every tick it
//! spawns the injected [`Source`] fetch as an independent task and hands each
//! successful result to the registered listener.  Fetch latency never delays
//! the clock: a slow fetch from tick N simply stays in flight while tick N+1
//! fires, so results reach the listener in *arrival* order, not tick order.
//!
//! Failures are logged and dropped — the next tick retries.  There is no
//! backoff, no jitter, and no per-fetch timeout.
//!
//! The listener is the "deliver here" seam: the host registers a closure
//! that forwards into whatever execution context its UI requires (in this
//! application, an [`std::sync::mpsc`] sender drained by the main loop).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::source::Source;

/// Whether the worker's ticker is currently scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
}

type Listener<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Fetches from a [`Source`] on a fixed cadence and publishes each success
/// to a single listener.
///
/// `start()` and `stop()` are both idempotent; starting while Running never
/// creates a second ticker.  `stop()` cancels future ticks only — fetches
/// already in flight are not cancelled, and their late results are still
/// delivered unless the host calls [`clear_listener`](Self::clear_listener)
/// first.
pub struct PeriodicWorker<T> {
    interval: Duration,
    source: Arc<dyn Source<T>>,
    listener: Arc<Mutex<Option<Listener<T>>>>,
    ticks: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> PeriodicWorker<T> {
    pub fn new(interval: Duration, source: Arc<dyn Source<T>>) -> Self {
        Self {
            interval,
            source,
            listener: Arc::new(Mutex::new(None)),
            ticks: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    /// Register the listener for successful fetches.
    ///
    /// Single-listener semantics: the last registration wins, there is no
    /// multicast.  Takes effect immediately, including for fetches already
    /// in flight.
    pub fn set_listener(&self, f: impl Fn(T) + Send + Sync + 'static) {
        *self.listener.lock().unwrap() = Some(Arc::new(f));
    }

    /// Drop the listener.  Results arriving afterwards go nowhere.
    pub fn clear_listener(&self) {
        *self.listener.lock().unwrap() = None;
    }

    pub fn state(&self) -> WorkerState {
        if self.ticker.is_some() {
            WorkerState::Running
        } else {
            WorkerState::Idle
        }
    }

    /// How many ticks have fired since construction.  Observable for tests
    /// and diagnostics; the listener never sees this.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Begin ticking.  The first tick fires one full interval from now.
    ///
    /// Must be called within a tokio runtime.  A no-op while Running.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        let period = self.interval;
        // Anchor the schedule at the moment start() is called, not at the
        // moment the ticker task first runs.
        let first_tick = time::Instant::now() + period;
        let source = Arc::clone(&self.source);
        let listener = Arc::clone(&self.listener);
        let ticks = Arc::clone(&self.ticks);

        self.ticker = Some(tokio::spawn(async move {
            let mut clock = time::interval_at(first_tick, period);
            // Stay on the wall-clock grid: if the runtime stalls past a
            // tick, skip it rather than firing a burst of catch-up ticks.
            clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                clock.tick().await;
                ticks.fetch_add(1, Ordering::Relaxed);

                // Each fetch is its own task so a slow fetch never delays
                // the clock or the fetches of later ticks.
                let source = Arc::clone(&source);
                let listener = Arc::clone(&listener);
                tokio::spawn(async move {
                    match source.fetch().await {
                        Ok(item) => {
                            let handler = listener.lock().unwrap().clone();
                            if let Some(handler) = handler {
                                handler(item);
                            }
                        }
                        Err(err) => {
                            tracing::warn!(
                                source = source.name(),
                                error = %err,
                                "fetch failed, retrying next tick"
                            );
                        }
                    }
                });
            }
        }));

        tracing::debug!(interval = ?self.interval, "periodic worker started");
    }

    /// Cancel the ticker.  In-flight fetches keep running to completion.
    /// A no-op while Idle.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            tracing::debug!("periodic worker stopped");
        }
    }
}

impl<T> Drop for PeriodicWorker<T> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
