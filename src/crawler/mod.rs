//! Crawler module for fetching pages and extracting content
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing and selector compilation
//! - Task dispatch and the per-type extraction handlers
//! - Round-based scheduling
//! - Overall crawl coordination

mod coordinator;
mod dispatcher;
mod fetcher;
mod handlers;
mod parser;
mod pipeline;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use dispatcher::{dispatch, dispatch_page};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use handlers::{compose_thread_markdown, ExtractError, HandlerContext, HandlerOutput};
pub use parser::{discover_links, parse_document, DiscoveredLink, Selectors};
pub use pipeline::{Pipeline, TaskError, TaskOutcome, TaskWorker};
pub use scheduler::{seed_tasks, Round, Scheduler};
