//! Filesystem artifact sink
//!
//! Writes `<root>/<id>.md` and `<root>/<id>.json` for every artifact.

use crate::output::traits::{ArtifactMetadata, ArtifactSink, OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact sink backed by a storage directory
#[derive(Debug, Clone)]
pub struct FsArtifactSink {
    root: PathBuf,
}

impl FsArtifactSink {
    /// Opens a sink rooted at `root`, creating the directory if needed
    pub fn create(root: impl Into<PathBuf>) -> OutputResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| OutputError::Write {
            path: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn markdown_path(&self, sequence_id: u64) -> PathBuf {
        self.root.join(format!("{}.md", sequence_id))
    }

    pub fn metadata_path(&self, sequence_id: u64) -> PathBuf {
        self.root.join(format!("{}.json", sequence_id))
    }

    fn write(path: &Path, content: &[u8]) -> OutputResult<()> {
        fs::write(path, content).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ArtifactSink for FsArtifactSink {
    fn write_markdown(&self, sequence_id: u64, content: &str) -> OutputResult<()> {
        let path = self.markdown_path(sequence_id);
        Self::write(&path, content.as_bytes())?;
        tracing::debug!("Wrote markdown {}", path.display());
        Ok(())
    }

    fn write_metadata(&self, sequence_id: u64, metadata: &ArtifactMetadata) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(metadata)
            .map_err(|e| OutputError::Format(e.to_string()))?;
        let path = self.metadata_path(sequence_id);
        Self::write(&path, json.as_bytes())?;
        tracing::debug!("Wrote metadata {}", path.display());
        Ok(())
    }
}
