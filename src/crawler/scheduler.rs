//! Round-based breadth-first scheduler
//!
//! This module handles:
//! - The FIFO task queue
//! - URL screening before a task takes a round slot
//! - Fanning a round out to concurrent workers and joining all of them
//!
//! # Round lifecycle
//!
//! 1. Pull tasks from the queue front until `max_concurrent` are admitted or
//!    the queue is empty. Rejected URLs are dropped and do not use a slot.
//! 2. Spawn one worker per admitted task into a `JoinSet`.
//! 3. Join every spawned worker (the round barrier) and append all follow-ups
//!    to the queue tail.
//! 4. Repeat until the queue is empty.
//!
//! The queue is owned by the scheduler alone and is only touched between
//! rounds, so it needs no lock. There is no visited set: a forum whose
//! pagination links back to an earlier page is crawled again.

use crate::config::Config;
use crate::crawler::pipeline::TaskWorker;
use crate::output::CrawlReport;
use crate::task::Task;
use crate::url::validate_task_url;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Tasks admitted together into one round
#[derive(Debug)]
pub struct Round {
    /// Round number, starting at 0
    pub id: u32,

    /// Admitted tasks, URLs already validated and normalized
    pub tasks: Vec<Task>,
}

/// Scheduler owns the task queue and drives rounds to completion
pub struct Scheduler {
    /// Pending tasks; follow-ups of round k sit behind everything queued before
    queue: VecDeque<Task>,

    /// Maximum number of tasks admitted into one round
    max_concurrent: usize,

    /// Base URL for root-relative resolution
    base_url: String,

    /// Id of the next round to start
    next_round: u32,

    report: CrawlReport,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Round size cap (at least 1)
    /// * `base_url` - Base URL used by the URL validator
    /// * `initial_tasks` - Tasks for the first round, in queue order
    pub fn new(
        max_concurrent: usize,
        base_url: impl Into<String>,
        initial_tasks: Vec<Task>,
    ) -> Self {
        Self {
            queue: VecDeque::from(initial_tasks),
            max_concurrent: max_concurrent.max(1),
            base_url: base_url.into(),
            next_round: 0,
            report: CrawlReport::new(),
        }
    }

    /// Creates a scheduler seeded from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.crawler.max_concurrent,
            config.base_url.clone(),
            seed_tasks(config),
        )
    }

    /// Appends tasks to the queue tail
    pub fn enqueue(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.queue.extend(tasks);
    }

    /// Returns the number of tasks waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Counters collected so far
    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    /// Admits the next round of tasks
    ///
    /// # Returns
    ///
    /// * `Some(Round)` - At least one task was admitted
    /// * `None` - The queue held no admissible task
    pub fn next_round(&mut self) -> Option<Round> {
        let id = self.next_round;
        let mut tasks = Vec::with_capacity(self.max_concurrent.min(self.queue.len()));

        while tasks.len() < self.max_concurrent {
            let Some(task) = self.queue.pop_front() else {
                break;
            };

            match validate_task_url(&task.url, &self.base_url) {
                Ok(url) => tasks.push(task.admitted(id, url)),
                Err(e) => {
                    tracing::warn!("{} ({})", e, task.task_type());
                    self.report.tasks_rejected += 1;
                }
            }
        }

        if tasks.is_empty() {
            return None;
        }

        self.next_round += 1;
        self.report.rounds += 1;
        self.report.tasks_admitted += tasks.len() as u64;
        Some(Round { id, tasks })
    }

    /// Runs rounds until the queue is drained
    ///
    /// Worker failures and panics are logged and counted; they never stop
    /// the crawl.
    pub async fn run<W: TaskWorker>(mut self, worker: Arc<W>) -> CrawlReport {
        tracing::info!(
            "Starting crawl with {} queued task(s), up to {} per round",
            self.queue.len(),
            self.max_concurrent
        );

        while let Some(round) = self.next_round() {
            let admitted = round.tasks.len();
            tracing::info!(
                "Round [{}] admitted {} task(s), {} still queued",
                round.id,
                admitted,
                self.queue.len()
            );

            let mut workers = JoinSet::new();
            for task in round.tasks {
                let worker = Arc::clone(&worker);
                workers.spawn(async move {
                    let label = task.to_string();
                    (label, worker.process(task).await)
                });
            }

            let mut followups = Vec::new();
            let mut failed = 0u64;
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok((_, Ok(outcome))) => {
                        if outcome.artifact.is_some() {
                            self.report.artifacts_written += 1;
                        }
                        followups.extend(outcome.followups);
                    }
                    Ok((label, Err(e))) => {
                        tracing::error!("Task {} failed: {}", label, e);
                        failed += 1;
                    }
                    Err(e) => {
                        tracing::error!("Worker aborted: {}", e);
                        failed += 1;
                    }
                }
            }

            tracing::info!(
                "Round [{}] complete: {} follow-up task(s), {} failure(s)",
                round.id,
                followups.len(),
                failed
            );
            self.report.tasks_failed += failed;
            self.enqueue(followups);
        }

        self.report.finish();
        tracing::info!(
            "Queue drained after {} round(s): {} artifact(s), {} failed task(s)",
            self.report.rounds,
            self.report.artifacts_written,
            self.report.tasks_failed
        );
        self.report
    }
}

/// Builds the initial tasks: knowledge-base entry points, then forum ones
pub fn seed_tasks(config: &Config) -> Vec<Task> {
    config
        .kb_entry_points
        .iter()
        .map(Task::listing_kb)
        .chain(config.forum_entry_points.iter().map(Task::listing_forum))
        .collect()
}
