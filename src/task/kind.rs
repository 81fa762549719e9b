/// Task definitions for the crawl state machine
///
/// Each task type is a state; listing states produce new tasks, detail states
/// are terminal and produce an artifact.
use crate::task::SequenceAllocator;
use serde::Serialize;
use std::fmt;

/// The four states of the extraction state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Knowledge-base table of contents
    ListingKb,

    /// Knowledge-base article
    DetailKb,

    /// Forum listing of solved threads
    ListingForum,

    /// Forum thread with its answers
    DetailForum,
}

impl TaskType {
    /// Returns true if this state produces an artifact instead of new tasks
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::DetailKb | Self::DetailForum)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListingKb => "listing_kb",
            Self::DetailKb => "detail_kb",
            Self::ListingForum => "listing_forum",
            Self::DetailForum => "detail_forum",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the artifact a detail task will produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTicket {
    /// Run-unique id, also the artifact file stem
    pub sequence_id: u64,

    /// Visible text of the anchor that led to this page
    pub title: Option<String>,
}

/// Per-state payload of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    ListingKb,
    DetailKb(ArtifactTicket),
    ListingForum,
    DetailForum(ArtifactTicket),
}

impl TaskKind {
    pub fn task_type(&self) -> TaskType {
        match self {
            Self::ListingKb => TaskType::ListingKb,
            Self::DetailKb(_) => TaskType::DetailKb,
            Self::ListingForum => TaskType::ListingForum,
            Self::DetailForum(_) => TaskType::DetailForum,
        }
    }

    /// The artifact ticket, present only on detail tasks
    pub fn ticket(&self) -> Option<&ArtifactTicket> {
        match self {
            Self::DetailKb(ticket) | Self::DetailForum(ticket) => Some(ticket),
            Self::ListingKb | Self::ListingForum => None,
        }
    }
}

/// One unit of crawl work
///
/// Tasks are values: handlers never modify the task they receive, they build
/// new ones. The round id is zero until the scheduler admits the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub url: String,
    pub round_id: u32,
    pub kind: TaskKind,
}

impl Task {
    fn new(url: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            url: url.into(),
            round_id: 0,
            kind,
        }
    }

    /// Creates a knowledge-base listing task
    pub fn listing_kb(url: impl Into<String>) -> Self {
        Self::new(url, TaskKind::ListingKb)
    }

    /// Creates a forum listing task
    pub fn listing_forum(url: impl Into<String>) -> Self {
        Self::new(url, TaskKind::ListingForum)
    }

    /// Creates a knowledge-base article task, drawing a fresh sequence id
    pub fn detail_kb(
        url: impl Into<String>,
        title: Option<String>,
        sequence: &SequenceAllocator,
    ) -> Self {
        let ticket = ArtifactTicket {
            sequence_id: sequence.next_id(),
            title,
        };
        Self::new(url, TaskKind::DetailKb(ticket))
    }

    /// Creates a forum thread task, drawing a fresh sequence id
    pub fn detail_forum(
        url: impl Into<String>,
        title: Option<String>,
        sequence: &SequenceAllocator,
    ) -> Self {
        let ticket = ArtifactTicket {
            sequence_id: sequence.next_id(),
            title,
        };
        Self::new(url, TaskKind::DetailForum(ticket))
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }

    /// Returns the admitted form of this task: its URL replaced by the
    /// validated one and stamped with the round it runs in
    pub fn admitted(self, round_id: u32, url: String) -> Self {
        Self {
            url,
            round_id,
            kind: self.kind,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.task_type(), self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(TaskType::DetailKb.is_terminal());
        assert!(TaskType::DetailForum.is_terminal());
        assert!(!TaskType::ListingKb.is_terminal());
        assert!(!TaskType::ListingForum.is_terminal());
    }

    #[test]
    fn test_listing_tasks_have_no_ticket() {
        assert!(Task::listing_kb("https://example.com/kb").kind.ticket().is_none());
        assert!(Task::listing_forum("https://example.com/f").kind.ticket().is_none());
    }

    #[test]
    fn test_detail_tasks_draw_sequence_ids() {
        let sequence = SequenceAllocator::new();
        let a = Task::detail_kb("/kb/a", Some("A".to_string()), &sequence);
        let b = Task::detail_forum("/t/b", None, &sequence);

        assert_eq!(a.kind.ticket().unwrap().sequence_id, 1);
        assert_eq!(a.kind.ticket().unwrap().title.as_deref(), Some("A"));
        assert_eq!(b.kind.ticket().unwrap().sequence_id, 2);
        assert_eq!(b.task_type(), TaskType::DetailForum);
    }

    #[test]
    fn test_admitted_keeps_kind() {
        let sequence = SequenceAllocator::new();
        let task = Task::detail_kb("/kb/a", None, &sequence);
        let kind = task.kind.clone();

        let admitted = task.admitted(3, "https://example.com/kb/a".to_string());
        assert_eq!(admitted.round_id, 3);
        assert_eq!(admitted.url, "https://example.com/kb/a");
        assert_eq!(admitted.kind, kind);
    }

    #[test]
    fn test_task_type_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskType::DetailForum).unwrap(),
            "\"detail_forum\""
        );
        assert_eq!(TaskType::ListingKb.to_string(), "listing_kb");
    }
}
