//! Versioned key-value store interface.
//!
//! The chain embeds the state manager on top of its own storage engine; this
//! module only defines the seam. Keys are grouped under a scope string, and
//! every `process` call brackets its writes between `snapshot` and an
//! implicit commit, reverting on error.

mod memory;

pub use memory::MemoryStore;

use anyhow::Result;

/// Opaque handle to a point-in-time state of the store.
pub type SnapshotId = usize;

pub trait StateStore {
    /// Read a value. `None` means the key was never written.
    fn get(&self, scope: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a value.
    fn put(&mut self, scope: &str, key: &str, value: Vec<u8>) -> Result<()>;

    /// Take a snapshot of the current state. Snapshots nest.
    fn snapshot(&mut self) -> SnapshotId;

    /// Roll every write back to the given snapshot. Reverting to a snapshot
    /// invalidates all snapshots taken after it.
    fn revert_to_snapshot(&mut self, id: SnapshotId);
}

/// Historical reads against the periodic snapshots the host records.
pub trait SnapshotReader {
    /// Value of `key` in the most recent snapshot at or before `time`.
    fn get_snapshot_msg(&self, scope: &str, key: &str, time: u64) -> Result<Option<Vec<u8>>>;

    /// Timestamp of the most recent snapshot, if any.
    fn get_last_snapshot_time(&self) -> Result<Option<u64>>;

    /// Timestamp of the most recent snapshot strictly before `time`, if any.
    fn get_prev_snapshot_time(&self, time: u64) -> Result<Option<u64>>;
}
