//! Output module for artifacts and crawl reports
//!
//! This module handles:
//! - Writing markdown documents and their JSON metadata sidecars
//! - Recording and printing end-of-run statistics

mod filesystem;
pub mod stats;
mod traits;

pub use filesystem::FsArtifactSink;
pub use stats::{print_report, CrawlReport};
pub use traits::{Artifact, ArtifactMetadata, ArtifactSink, OutputError, OutputResult};
