use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::snapshot::PersistedSnapshot;
use crate::store::{SnapshotStore, StoreError};

/// In-memory snapshot store.
///
/// The injectable stand-in for [`crate::JsonFileStore`] in tests and in
/// hosts without durable storage. Same observable behavior, no disk.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<PersistedSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<(), StoreError> {
        *self.inner.lock().await = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<PersistedSnapshot>, StoreError> {
        let stored = self.inner.lock().await.clone();
        Ok(stored.filter(|snapshot| snapshot.schema_version == crate::SCHEMA_VERSION))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.inner.lock().await = None;
        Ok(())
    }

    async fn has_saved_data(&self) -> bool {
        self.inner.lock().await.is_some()
    }
}
