//! Per-task pipeline: fetch, parse, dispatch, write
//!
//! Every admitted task runs through one [`TaskWorker::process`] call. Failures
//! come back as [`TaskError`] values for the scheduler to count; nothing in
//! here terminates the crawl.

use crate::crawler::dispatcher::dispatch_page;
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::handlers::{ExtractError, HandlerContext};
use crate::crawler::parser::Selectors;
use crate::output::{ArtifactSink, OutputError};
use crate::task::{SequenceAllocator, Task};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Ways a single task can fail
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Fetch of {url} did not finish within {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result of a successfully processed task
#[derive(Debug, Default)]
pub struct TaskOutcome {
    /// Tasks discovered on the page
    pub followups: Vec<Task>,

    /// Sequence id of the artifact written, for terminal tasks
    pub artifact: Option<u64>,
}

/// One unit of concurrent work in a round
#[async_trait]
pub trait TaskWorker: Send + Sync + 'static {
    async fn process(&self, task: Task) -> Result<TaskOutcome, TaskError>;
}

/// The production worker
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn ArtifactSink>,
    selectors: Selectors,
    sequence: SequenceAllocator,
    fetch_timeout: Duration,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn ArtifactSink>,
        selectors: Selectors,
        sequence: SequenceAllocator,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            sink,
            selectors,
            sequence,
            fetch_timeout,
        }
    }

    pub fn sequence(&self) -> &SequenceAllocator {
        &self.sequence
    }

    fn context(&self) -> HandlerContext<'_> {
        HandlerContext {
            selectors: &self.selectors,
            sequence: &self.sequence,
        }
    }
}

#[async_trait]
impl TaskWorker for Pipeline {
    async fn process(&self, task: Task) -> Result<TaskOutcome, TaskError> {
        tracing::info!("Round [{}] processing {}", task.round_id, task);

        let page = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(&task.url))
            .await
            .map_err(|_| TaskError::Timeout {
                url: task.url.clone(),
                seconds: self.fetch_timeout.as_secs(),
            })??;

        let output = dispatch_page(&task, &page.body, self.context())?;
        if !task.task_type().is_terminal() {
            tracing::debug!("{} discovered {} task(s)", task, output.followups.len());
        }

        let artifact = match &output.artifact {
            Some(artifact) => {
                self.sink.write_artifact(artifact)?;
                tracing::debug!(
                    "Wrote artifact {} for {}",
                    artifact.sequence_id(),
                    task.url
                );
                Some(artifact.sequence_id())
            }
            None => None,
        };

        Ok(TaskOutcome {
            followups: output.followups,
            artifact,
        })
    }
}
