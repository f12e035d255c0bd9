use async_trait::async_trait;
use thiserror::Error;

use crate::snapshot::PersistedSnapshot;

/// Storage-layer failures.
///
/// These are non-fatal to the workflow: callers log them and keep the
/// in-memory state authoritative for the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Versioned save/load/clear of a [`PersistedSnapshot`].
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Serialize and write the snapshot, overwriting any prior one.
    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<(), StoreError>;

    /// The most recent snapshot, or `None` when nothing usable exists.
    ///
    /// A stored schema version other than the current one is treated as
    /// absent: the stale data is discarded rather than partially
    /// applied.
    async fn load(&self) -> Result<Option<PersistedSnapshot>, StoreError>;

    /// Remove the snapshot entirely ("start over").
    async fn clear(&self) -> Result<(), StoreError>;

    /// Existence check without deserialization cost; drives whether a
    /// restore affordance is shown.
    async fn has_saved_data(&self) -> bool;
}
