use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::trace;

use crate::document::MarketDocument;
use crate::identity::Actor;
use crate::message::{BundleId, OutgoingMessage, OutgoingMessageId};
use crate::queue::{ActorMessageQueue, QueueChange};
use crate::repository::{
    ActorMessageQueueRepository, InsertOutcome, MarketDocumentRepository,
    OutgoingMessageRepository, RepositoryError,
};

struct MessageRow {
    seq: u64,
    message: OutgoingMessage,
}

#[derive(Default)]
struct Tables {
    queues: HashMap<Actor, ActorMessageQueue>,
    messages: HashMap<OutgoingMessageId, MessageRow>,
    bundles: HashMap<BundleId, Vec<OutgoingMessageId>>,
    documents: HashMap<BundleId, MarketDocument>,
    message_seq: u64,
}

/// Writes validated against the current tables before anything is applied.
#[derive(Default)]
struct WritePlan {
    inserts: Vec<OutgoingMessage>,
    assignments: Vec<(OutgoingMessageId, BundleId)>,
    dequeued: Vec<BundleId>,
}

/// In-memory store with the semantics a relational backend must provide:
/// versioned queue rows, message rows keyed by id with a bundle index, and a
/// document table unique per bundle. Every commit happens under one write lock,
/// so it is all-or-nothing. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct HashMapRepository {
    tables: Arc<RwLock<Tables>>,
}

impl HashMapRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored message rows.
    pub fn message_count(&self) -> Result<usize, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(tables.messages.len())
    }

    /// Number of cached documents.
    pub fn document_count(&self) -> Result<usize, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(tables.documents.len())
    }

    fn plan(
        tables: &Tables,
        queue: &ActorMessageQueue,
        new_messages: &[OutgoingMessage],
    ) -> Result<WritePlan, RepositoryError> {
        let mut incoming: HashMap<OutgoingMessageId, &OutgoingMessage> =
            new_messages.iter().map(|m| (m.id(), m)).collect();
        let mut plan = WritePlan::default();

        for change in queue.changes() {
            match change {
                QueueChange::MessageEnqueued { message_id, .. } => {
                    let message = incoming.remove(message_id).ok_or_else(|| {
                        RepositoryError::Inconsistent(format!(
                            "message {} enqueued without its row",
                            message_id
                        ))
                    })?;
                    if tables.messages.contains_key(message_id) {
                        return Err(RepositoryError::Inconsistent(format!(
                            "message {} already stored",
                            message_id
                        )));
                    }
                    if message.receiver() != queue.receiver() || message.is_bundled() {
                        return Err(RepositoryError::Inconsistent(format!(
                            "message {} does not belong unbundled to queue {}",
                            message_id,
                            queue.receiver()
                        )));
                    }
                    plan.inserts.push(message.clone());
                }
                QueueChange::BundleAssigned {
                    bundle_id,
                    message_ids,
                } => {
                    for message_id in message_ids {
                        let already = plan.assignments.iter().any(|(id, _)| id == message_id);
                        let current = match plan.inserts.iter().find(|m| m.id() == *message_id) {
                            Some(message) => Some(message.bundle_id()),
                            None => tables
                                .messages
                                .get(message_id)
                                .map(|row| row.message.bundle_id()),
                        };
                        match current {
                            None => {
                                return Err(RepositoryError::Inconsistent(format!(
                                    "bundle {} references unknown message {}",
                                    bundle_id, message_id
                                )))
                            }
                            Some(Some(_)) => {
                                return Err(RepositoryError::Inconsistent(format!(
                                    "message {} is already bundled",
                                    message_id
                                )))
                            }
                            Some(None) if already => {
                                return Err(RepositoryError::Inconsistent(format!(
                                    "message {} assigned twice",
                                    message_id
                                )))
                            }
                            Some(None) => plan.assignments.push((*message_id, *bundle_id)),
                        }
                    }
                }
                QueueChange::BundleDequeued { bundle_id, .. } => plan.dequeued.push(*bundle_id),
            }
        }

        if let Some(orphan) = incoming.keys().next() {
            return Err(RepositoryError::Inconsistent(format!(
                "row for message {} has no matching enqueue",
                orphan
            )));
        }

        Ok(plan)
    }

    fn apply(tables: &mut Tables, plan: WritePlan) {
        for message in plan.inserts {
            tables.message_seq += 1;
            let seq = tables.message_seq;
            tables
                .messages
                .insert(message.id(), MessageRow { seq, message });
        }

        for (message_id, bundle_id) in plan.assignments {
            if let Some(row) = tables.messages.get_mut(&message_id) {
                row.message.assign_to_bundle(bundle_id);
                tables.bundles.entry(bundle_id).or_default().push(message_id);
            }
        }

        for bundle_id in plan.dequeued {
            for message_id in tables.bundles.remove(&bundle_id).unwrap_or_default() {
                tables.messages.remove(&message_id);
            }
            tables.documents.remove(&bundle_id);
        }
    }
}

#[async_trait]
impl ActorMessageQueueRepository for HashMapRepository {
    async fn get_queue(
        &self,
        receiver: &Actor,
    ) -> Result<Option<ActorMessageQueue>, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(tables.queues.get(receiver).cloned())
    }

    async fn commit_queue(
        &self,
        queue: &mut ActorMessageQueue,
        new_messages: &[OutgoingMessage],
    ) -> Result<(), RepositoryError> {
        if !queue.has_uncommitted_changes() && new_messages.is_empty() {
            return Ok(());
        }

        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;

        let actual = tables
            .queues
            .get(queue.receiver())
            .map(|stored| stored.version())
            .unwrap_or(0);
        if actual != queue.committed_version() {
            return Err(RepositoryError::ConcurrentWrite {
                id: queue.receiver().to_string(),
                expected: queue.committed_version(),
                actual,
            });
        }

        let plan = Self::plan(&tables, queue, new_messages)?;
        for change in queue.changes() {
            trace!(queue = %queue.receiver(), change = change.name(), "applying change");
        }
        Self::apply(&mut tables, plan);

        queue.mark_committed();
        tables.queues.insert(queue.receiver().clone(), queue.clone());
        Ok(())
    }
}

#[async_trait]
impl OutgoingMessageRepository for HashMapRepository {
    async fn get_message(
        &self,
        id: OutgoingMessageId,
    ) -> Result<Option<OutgoingMessage>, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(tables.messages.get(&id).map(|row| row.message.clone()))
    }

    async fn get_bundle_messages(
        &self,
        bundle_id: BundleId,
    ) -> Result<Vec<OutgoingMessage>, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;

        let mut rows: Vec<&MessageRow> = tables
            .bundles
            .get(&bundle_id)
            .map(|ids| ids.iter().filter_map(|id| tables.messages.get(id)).collect())
            .unwrap_or_default();
        rows.sort_by_key(|row| row.seq);
        Ok(rows.into_iter().map(|row| row.message.clone()).collect())
    }
}

#[async_trait]
impl MarketDocumentRepository for HashMapRepository {
    async fn get_document(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<MarketDocument>, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(tables.documents.get(&bundle_id).cloned())
    }

    async fn insert_document(
        &self,
        document: MarketDocument,
    ) -> Result<Option<InsertOutcome<MarketDocument>>, RepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("document write"))?;

        if !tables.bundles.contains_key(&document.bundle_id()) {
            return Ok(None);
        }
        if let Some(existing) = tables.documents.get(&document.bundle_id()) {
            return Ok(Some(InsertOutcome::AlreadyExists(existing.clone())));
        }
        tables
            .documents
            .insert(document.bundle_id(), document.clone());
        Ok(Some(InsertOutcome::Inserted(document)))
    }
}
