use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::{Context, Result, ensure};
use crossbeam_channel::{RecvTimeoutError, Sender, unbounded};

use crate::progress::{ProgressProbe, ProgressSnapshot};

/// Schedule for a `ProgressReporter`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Stop by itself after this long; `None` runs until stopped.
    pub duration: Option<Duration>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(1), duration: None }
    }
}

/// Periodically hands snapshots of a `ProgressProbe` to a callback on its own thread.
///
/// The reporter never touches search state. Dropping it stops the thread and joins it.
#[derive(Debug)]
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Spawn the reporter thread.
    pub fn start<F>(probe: Arc<ProgressProbe>, config: ReporterConfig, mut on_tick: F) -> Result<Self>
    where
        F: FnMut(&ProgressSnapshot) + Send + 'static,
    {
        ensure!(!config.interval.is_zero(), "[ProgressReporter::start] interval must be positive");

        let (stop_tx, stop_rx) = unbounded::<()>();
        let handle = thread::Builder::new()
            .name("progress".into())
            .spawn(move || {
                let start = Instant::now();
                let deadline = config.duration.map(|d| start + d);
                let mut next_tick = start + config.interval;

                loop {
                    let wake = deadline.map_or(next_tick, |d| d.min(next_tick));
                    match stop_rx.recv_timeout(wake.saturating_duration_since(Instant::now())) {
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }

                    let now = Instant::now();
                    on_tick(&probe.snapshot(now - start));
                    if deadline.is_some_and(|d| now >= d) { break }

                    // Skip ticks missed by a slow callback instead of bursting.
                    next_tick += config.interval;
                    if next_tick <= now { next_tick = now + config.interval }
                }
            })
            .context("[ProgressReporter::start] Failed to spawn reporter thread")?;

        Ok(Self { stop_tx: Some(stop_tx), handle: Some(handle) })
    }

    /// Returns true while the reporter thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the reporter to stop and wait for its thread to exit.
    pub fn stop(mut self) { self.shutdown() }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) { self.shutdown() }
}
