//! Durable, versioned save/restore of wizard progress.
//!
//! The store is an explicit, injectable interface so the wizard
//! controller never touches storage directly and tests can swap in
//! [`MemoryStore`] without changing the controller.

mod json_file;
mod memory;
mod snapshot;
mod store;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot::{PersistedSnapshot, SCHEMA_VERSION};
pub use store::{SnapshotStore, StoreError};
