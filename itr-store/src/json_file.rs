use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::snapshot::{PersistedSnapshot, SCHEMA_VERSION};
use crate::store::{SnapshotStore, StoreError};

/// Fixed application namespace for the on-disk snapshot.
const SNAPSHOT_FILE: &str = "itr-wizard-snapshot.json";

/// Version marker read before the full snapshot is trusted.
#[derive(Debug, Deserialize)]
struct SchemaMarker {
    #[serde(default)]
    schema_version: u32,
}

/// Snapshot store backed by a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the snapshot under `dir` using the fixed file name.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "wizard snapshot saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<PersistedSnapshot>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // Check the version marker before deserializing the full shape.
        let marker: SchemaMarker = match serde_json::from_slice(&bytes) {
            Ok(marker) => marker,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable snapshot; ignoring");
                return Ok(None);
            }
        };
        if marker.schema_version != SCHEMA_VERSION {
            debug!(
                stored = marker.schema_version,
                current = SCHEMA_VERSION,
                "snapshot schema version mismatch; discarding"
            );
            return Ok(None);
        }

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "snapshot failed to parse; ignoring");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn has_saved_data(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}
