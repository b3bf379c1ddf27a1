//! Persistence for the most recent capture.
//!
//! Whole-array replace semantics: a new capture overwrites the previous one
//! wholesale, and the user can clear it explicitly. Durability across every
//! failure mode is not required; session-scoped storage is acceptable.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::SyncError;
use crate::types::CapturedFieldRecord;

/// Storage backend for captured field records.
#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Replace the stored capture wholesale.
    async fn save(&self, records: Vec<CapturedFieldRecord>) -> Result<(), SyncError>;

    /// The stored capture, or `None` when nothing has been captured (or the
    /// capture was cleared).
    async fn load(&self) -> Result<Option<Vec<CapturedFieldRecord>>, SyncError>;

    async fn clear(&self) -> Result<(), SyncError>;
}

/// In-memory store with session-storage semantics.
#[derive(Debug, Default)]
pub struct MemoryCaptureStore {
    records: RwLock<Option<Vec<CapturedFieldRecord>>>,
}

#[async_trait]
impl CaptureStore for MemoryCaptureStore {
    async fn save(&self, records: Vec<CapturedFieldRecord>) -> Result<(), SyncError> {
        *self.records.write().map_err(|_| poisoned())? = Some(records);
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<CapturedFieldRecord>>, SyncError> {
        Ok(self.records.read().map_err(|_| poisoned())?.clone())
    }

    async fn clear(&self) -> Result<(), SyncError> {
        *self.records.write().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

fn poisoned() -> SyncError {
    SyncError::Internal("capture store lock poisoned".to_string())
}
