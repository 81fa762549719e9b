//! End-of-run crawl report
//!
//! The scheduler fills a [`CrawlReport`] as rounds complete; the binary prints
//! it and derives its exit status from it.

use chrono::{DateTime, Utc};

/// Counters collected over one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Number of rounds executed
    pub rounds: u32,

    /// Tasks that passed URL validation and were handed to a worker
    pub tasks_admitted: u64,

    /// Tasks dropped by URL validation
    pub tasks_rejected: u64,

    /// Admitted tasks whose pipeline returned an error or panicked
    pub tasks_failed: u64,

    /// Markdown + metadata pairs written
    pub artifacts_written: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlReport {
    /// Creates an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            rounds: 0,
            tasks_admitted: 0,
            tasks_rejected: 0,
            tasks_failed: 0,
            artifacts_written: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns true if every admitted task completed without error
    pub fn is_complete(&self) -> bool {
        self.tasks_failed == 0
    }

    /// Admitted tasks that completed without error
    pub fn tasks_succeeded(&self) -> u64 {
        self.tasks_admitted.saturating_sub(self.tasks_failed)
    }

    /// Returns the failure rate as a percentage of admitted tasks
    pub fn failure_rate(&self) -> f64 {
        if self.tasks_admitted == 0 {
            return 0.0;
        }
        (self.tasks_failed as f64 / self.tasks_admitted as f64) * 100.0
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = report.duration_seconds() {
        println!("  Duration: {:.2}s", duration);
    }
    println!("  Rounds: {}", report.rounds);
    println!();

    println!("Tasks:");
    println!("  Admitted: {}", report.tasks_admitted);
    println!("  Succeeded: {}", report.tasks_succeeded());
    println!(
        "  Failed: {} ({:.1}%)",
        report.tasks_failed,
        report.failure_rate()
    );
    println!("  Rejected URLs: {}", report.tasks_rejected);
    println!();

    println!("Artifacts written: {}", report.artifacts_written);

    if !report.is_complete() {
        println!(
            "\nCrawl finished with {} failed task(s); see the log for details",
            report.tasks_failed
        );
    }
}
