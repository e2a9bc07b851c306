use async_trait::async_trait;

use super::error::RepositoryError;
use crate::document::MarketDocument;
use crate::identity::Actor;
use crate::message::{BundleId, OutgoingMessage, OutgoingMessageId};
use crate::queue::ActorMessageQueue;

/// Result of an insert guarded by a uniqueness constraint. A losing writer
/// gets the committed row back instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    Inserted(T),
    AlreadyExists(T),
}

impl<T> InsertOutcome<T> {
    pub fn was_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            InsertOutcome::Inserted(value) | InsertOutcome::AlreadyExists(value) => value,
        }
    }
}

/// Load and persist actor queues.
#[async_trait]
pub trait ActorMessageQueueRepository: Send + Sync {
    async fn get_queue(&self, receiver: &Actor)
        -> Result<Option<ActorMessageQueue>, RepositoryError>;

    /// Persist the queue's uncommitted changes and the rows of newly enqueued
    /// messages as one unit.
    ///
    /// Fails with `ConcurrentWrite` when the stored version moved since the
    /// queue was loaded; nothing is written in that case. On success the
    /// queue is marked committed.
    async fn commit_queue(
        &self,
        queue: &mut ActorMessageQueue,
        new_messages: &[OutgoingMessage],
    ) -> Result<(), RepositoryError>;
}

/// Read access to persisted outgoing message rows.
#[async_trait]
pub trait OutgoingMessageRepository: Send + Sync {
    async fn get_message(
        &self,
        id: OutgoingMessageId,
    ) -> Result<Option<OutgoingMessage>, RepositoryError>;

    /// Messages of a bundle in enqueue order.
    async fn get_bundle_messages(
        &self,
        bundle_id: BundleId,
    ) -> Result<Vec<OutgoingMessage>, RepositoryError>;
}

/// Cache of rendered documents, unique per bundle.
#[async_trait]
pub trait MarketDocumentRepository: Send + Sync {
    async fn get_document(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<MarketDocument>, RepositoryError>;

    /// Cache a rendered document. Returns `None`, storing nothing, when its
    /// bundle is no longer undelivered (dequeued or never closed).
    async fn insert_document(
        &self,
        document: MarketDocument,
    ) -> Result<Option<InsertOutcome<MarketDocument>>, RepositoryError>;
}

/// Everything the delivery use cases need from storage.
pub trait MessageStore:
    ActorMessageQueueRepository + OutgoingMessageRepository + MarketDocumentRepository
{
}

impl<T> MessageStore for T where
    T: ActorMessageQueueRepository + OutgoingMessageRepository + MarketDocumentRepository
{
}
