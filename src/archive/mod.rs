//! Audit archive of delivered documents.
//!
//! The archive's own persistence is an external collaborator; the delivery
//! layer only depends on `ArchivedMessageRepository`.

mod archived_message;
mod in_memory;

use async_trait::async_trait;

use crate::message::BundleId;
use crate::repository::{InsertOutcome, RepositoryError};

pub use archived_message::ArchivedMessage;
pub use in_memory::InMemoryArchive;

pub type ArchiveOutcome = InsertOutcome<ArchivedMessage>;

#[async_trait]
pub trait ArchivedMessageRepository: Send + Sync {
    /// Store the archive copy of a bundle's document. Unique per bundle: when
    /// a copy already exists it is returned unchanged.
    async fn add(&self, message: ArchivedMessage) -> Result<ArchiveOutcome, RepositoryError>;

    async fn get_by_bundle(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<ArchivedMessage>, RepositoryError>;
}
