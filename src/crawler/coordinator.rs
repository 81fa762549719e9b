//! Crawler coordinator - wires configuration to a running crawl
//!
//! This module builds everything a crawl needs from the configuration:
//! - The HTTP fetcher and its client
//! - The artifact sink over the storage directory
//! - The compiled selectors and the sequence allocator
//! - The scheduler seeded with the entry points

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, Fetcher, HttpFetcher};
use crate::crawler::parser::Selectors;
use crate::crawler::pipeline::Pipeline;
use crate::crawler::scheduler::Scheduler;
use crate::output::{ArtifactSink, CrawlReport, FsArtifactSink};
use crate::task::SequenceAllocator;
use crate::HarvestError;
use std::sync::Arc;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    scheduler: Scheduler,
    pipeline: Arc<Pipeline>,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP and writes to the
    /// configured storage directory
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - The client, directory, or selectors could not be set up
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let sink = FsArtifactSink::create(&config.html_storage_path)?;
        tracing::info!("Writing artifacts to {}", sink.root().display());

        Self::with_parts(config, Arc::new(HttpFetcher::new(client)), Arc::new(sink))
    }

    /// Creates a coordinator over caller-supplied collaborators
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Result<Self, HarvestError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let pipeline = Pipeline::new(
            fetcher,
            sink,
            selectors,
            SequenceAllocator::new(),
            Duration::from_secs(config.crawler.request_timeout_secs),
        );

        Ok(Self {
            scheduler: Scheduler::from_config(&config),
            pipeline: Arc::new(pipeline),
        })
    }

    /// Number of tasks seeded from the entry points
    pub fn queued(&self) -> usize {
        self.scheduler.queue_len()
    }

    /// Runs the crawl until the queue is drained
    pub async fn run(self) -> CrawlReport {
        let report = self.scheduler.run(Arc::clone(&self.pipeline)).await;
        tracing::debug!(
            "Issued {} sequence id(s) during the run",
            self.pipeline.sequence().issued()
        );
        report
    }
}

/// Runs a complete crawl from configuration
///
/// # Example
///
/// ```no_run
/// use kb_harvest::config::load_config;
/// use kb_harvest::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.json"))?;
/// let report = run_crawl(config).await?;
/// println!("{} artifacts written", report.artifacts_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
