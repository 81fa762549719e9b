//! Task module for the crawl state machine
//!
//! # Components
//!
//! - `Task`: one unit of crawl work (URL, round, per-state payload)
//! - `TaskKind` / `TaskType`: the four states and their payloads
//! - `SequenceAllocator`: run-wide artifact id source

mod kind;
mod sequence;

// Re-export main types
pub use kind::{ArtifactTicket, Task, TaskKind, TaskType};
pub use sequence::SequenceAllocator;
