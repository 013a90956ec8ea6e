use std::collections::BTreeMap;

use anyhow::Result;
use log::warn;

use super::{SnapshotId, SnapshotReader, StateStore};

// Undo-log entry: the value a key held before a write (None = absent)
struct JournalEntry {
    scope: String,
    key: String,
    prev: Option<Vec<u8>>,
}

/// In-memory reference store with journal-based snapshot/revert.
///
/// Every write records the previous value in an undo log; a snapshot is a
/// mark into that log and reverting replays it backwards. Hosts embed their
/// own engine in production, this one backs the tests and small tools.
#[derive(Default)]
pub struct MemoryStore {
    data: BTreeMap<(String, String), Vec<u8>>,
    journal: Vec<JournalEntry>,
    snapshots: Vec<usize>,
    // Periodic full snapshots keyed by timestamp, for historical queries
    history: BTreeMap<u64, BTreeMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a full snapshot of the current state under `time`.
    /// The host calls this on its snapshot schedule.
    pub fn record_snapshot(&mut self, time: u64) {
        self.history.insert(time, self.data.clone());
    }

    /// Dump the live state, for byte-level comparisons in tests.
    pub fn dump(&self) -> BTreeMap<(String, String), Vec<u8>> {
        self.data.clone()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, scope: &str, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .data
            .get(&(scope.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&mut self, scope: &str, key: &str, value: Vec<u8>) -> Result<()> {
        let prev = self
            .data
            .insert((scope.to_string(), key.to_string()), value);
        self.journal.push(JournalEntry {
            scope: scope.to_string(),
            key: key.to_string(),
            prev,
        });
        Ok(())
    }

    fn snapshot(&mut self) -> SnapshotId {
        self.snapshots.push(self.journal.len());
        self.snapshots.len() - 1
    }

    fn revert_to_snapshot(&mut self, id: SnapshotId) {
        let Some(&mark) = self.snapshots.get(id) else {
            warn!("revert to unknown snapshot {id}, ignoring");
            return;
        };

        while self.journal.len() > mark {
            let entry = self.journal.pop().expect("journal entry past mark");
            let slot = (entry.scope, entry.key);
            match entry.prev {
                Some(value) => {
                    self.data.insert(slot, value);
                }
                None => {
                    self.data.remove(&slot);
                }
            }
        }
        self.snapshots.truncate(id);
    }
}

impl SnapshotReader for MemoryStore {
    fn get_snapshot_msg(&self, scope: &str, key: &str, time: u64) -> Result<Option<Vec<u8>>> {
        let Some((_, state)) = self.history.range(..=time).next_back() else {
            return Ok(None);
        };
        Ok(state.get(&(scope.to_string(), key.to_string())).cloned())
    }

    fn get_last_snapshot_time(&self) -> Result<Option<u64>> {
        Ok(self.history.keys().next_back().copied())
    }

    fn get_prev_snapshot_time(&self, time: u64) -> Result<Option<u64>> {
        Ok(self.history.range(..time).next_back().map(|(t, _)| *t))
    }
}
