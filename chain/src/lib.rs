#![allow(clippy::too_many_arguments)] // API design choice

pub mod error;
pub mod manager;
pub mod registry;
pub mod resolver;
pub mod storage;

pub use error::StateError;
pub use manager::AccountManager;
pub use registry::AssetRegistry;
pub use resolver::{AuthError, AuthorVersionCache, RecoveredSigner};
pub use storage::{MemoryStore, SnapshotId, SnapshotReader, StateStore};
