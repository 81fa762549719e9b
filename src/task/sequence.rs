use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Run-wide source of artifact sequence ids
///
/// Clones share the same counter, so workers in the same or different rounds
/// never receive the same id. Ids are strictly increasing in issuance order.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    next: Arc<AtomicU64>,
    first: u64,
}

impl SequenceAllocator {
    /// Creates an allocator whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
            first,
        }
    }

    /// Issues the next id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - self.first
    }
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}
