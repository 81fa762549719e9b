//! Artifact sink trait and associated types
//!
//! This module defines the interface terminal handlers write through and
//! the records they produce.

use crate::task::TaskType;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// JSON sidecar written next to every markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMetadata {
    /// Page the document was extracted from
    pub source_url: String,

    /// Anchor text (or page title) the page was reached through
    pub source_url_title: Option<String>,

    /// Sequence id, also the file stem of both artifact files
    pub id: u64,

    /// Task type that produced the document
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// A terminal extraction result: one markdown document and its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub markdown: String,
    pub metadata: ArtifactMetadata,
}

impl Artifact {
    pub fn sequence_id(&self) -> u64 {
        self.metadata.id
    }
}

/// Trait for artifact sinks
///
/// Artifacts are keyed by sequence id, which is unique per run, so concurrent
/// workers never write the same files. Implementations must be thread-safe.
pub trait ArtifactSink: Send + Sync {
    /// Writes the markdown document for an artifact
    fn write_markdown(&self, sequence_id: u64, content: &str) -> OutputResult<()>;

    /// Writes the metadata record for an artifact
    fn write_metadata(&self, sequence_id: u64, metadata: &ArtifactMetadata) -> OutputResult<()>;

    /// Writes both halves of an artifact
    fn write_artifact(&self, artifact: &Artifact) -> OutputResult<()> {
        self.write_markdown(artifact.sequence_id(), &artifact.markdown)?;
        self.write_metadata(artifact.sequence_id(), &artifact.metadata)
    }
}
