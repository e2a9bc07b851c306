//! InMemoryArchive - HashMap-backed archive for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{ArchiveOutcome, ArchivedMessage, ArchivedMessageRepository};
use crate::message::BundleId;
use crate::repository::{InsertOutcome, RepositoryError};

/// In-memory archive, unique per bundle id. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryArchive {
    storage: Arc<RwLock<HashMap<BundleId, ArchivedMessage>>>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArchivedMessageRepository for InMemoryArchive {
    async fn add(&self, message: ArchivedMessage) -> Result<ArchiveOutcome, RepositoryError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("archive write"))?;

        if let Some(existing) = storage.get(&message.bundle_id) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        storage.insert(message.bundle_id, message.clone());
        Ok(InsertOutcome::Inserted(message))
    }

    async fn get_by_bundle(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<ArchivedMessage>, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("archive read"))?;
        Ok(storage.get(&bundle_id).cloned())
    }
}
