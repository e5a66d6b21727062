use std::{
    sync::{Arc, atomic::AtomicBool},
    thread,
    time::Duration,
};

use anyhow::{Context, Result, anyhow};

use crate::{
    config::SearchConfig,
    graph::Graph,
    progress::{ProgressProbe, ProgressReporter, ProgressSnapshot, ReporterConfig},
    search::{SearchEngine, SearchReport},
};

/// A configured search run: the engine on its own thread, plus an optional progress reporter.
#[derive(Clone, Debug)]
pub struct Search {
    graph: Arc<Graph>,
    config: SearchConfig,
    reporter: Option<ReporterConfig>,
    time_limit: Option<Duration>,
    stop: Arc<AtomicBool>,
}

impl Search {
    /// Create a run over `graph`, checking `config` against it.
    pub fn new(graph: impl Into<Arc<Graph>>, config: SearchConfig) -> Result<Self> {
        let graph: Arc<Graph> = graph.into();
        config.validate(&graph)?;

        Ok(Self {
            graph,
            config,
            reporter: None,
            time_limit: None,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Report progress on the given schedule while searching.
    pub fn with_reporter(mut self, reporter: ReporterConfig) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Cancel the search after `limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline] pub fn graph(&self) -> &Graph { &self.graph }

    #[inline] pub fn config(&self) -> &SearchConfig { &self.config }

    /// Flag that cancels the run when set to true (e.g. from a signal handler).
    #[inline] pub fn stop_flag(&self) -> Arc<AtomicBool> { self.stop.clone() }

    /// Run the search to a terminal state, passing progress snapshots to `on_progress`.
    ///
    /// `on_progress` is only called if a reporter schedule was set.
    pub fn run<F>(&self, on_progress: F) -> Result<SearchReport>
    where
        F: FnMut(&ProgressSnapshot) + Send + 'static,
    {
        let probe = Arc::new(ProgressProbe::new(self.graph.node_count(), self.config.districts));

        let mut engine = SearchEngine::new(self.graph.clone(), self.config.clone())?
            .with_probe(probe.clone())
            .with_stop_flag(self.stop.clone());
        if let Some(limit) = self.time_limit {
            engine = engine.with_time_limit(limit);
        }

        let reporter = self.reporter
            .map(|schedule| ProgressReporter::start(probe, schedule, on_progress))
            .transpose()?;

        let handle = thread::Builder::new()
            .name("search".into())
            .stack_size(self.config.stack_size_mb * 1024 * 1024)
            .spawn(move || engine.run())
            .context("[Search::run] Failed to spawn search thread")?;
        let report = handle.join().map_err(|_| anyhow!("[Search::run] search thread panicked"));

        if let Some(reporter) = reporter { reporter.stop() }
        report
    }
}
