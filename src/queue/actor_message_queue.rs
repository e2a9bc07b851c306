use std::fmt;

use chrono::{DateTime, Utc};

use super::{Bundle, QueueChange, QueueError};
use crate::identity::Actor;
use crate::message::{
    ActorMessageQueueId, BundleId, BundlingKey, MessageCategory, OutgoingMessage,
    OutgoingMessageId,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct QueuedMessage {
    id: OutgoingMessageId,
    key: BundlingKey,
    enqueued_at: DateTime<Utc>,
}

/// Per-(actor, role) queue of outgoing messages.
///
/// Holds only what is still deliverable: the ordered identifiers of unbundled
/// messages and the bundles that have been peeked but not dequeued. Message
/// rows themselves live in storage.
///
/// Invariants:
/// - at most one undelivered bundle per category;
/// - a message is bundled at most once;
/// - unbundled messages keep their enqueue order.
#[derive(Clone)]
pub struct ActorMessageQueue {
    id: ActorMessageQueueId,
    receiver: Actor,
    unbundled: Vec<QueuedMessage>,
    bundles: Vec<Bundle>,
    version: u64,
    committed_version: u64,
    changes: Vec<QueueChange>,
}

impl fmt::Debug for ActorMessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorMessageQueue")
            .field("id", &self.id)
            .field("receiver", &self.receiver)
            .field("unbundled", &self.unbundled.len())
            .field("bundles", &self.bundles.len())
            .field("version", &self.version)
            .field("committed_version", &self.committed_version)
            .field("changes", &self.changes)
            .finish()
    }
}

impl ActorMessageQueue {
    /// Empty queue for a receiver that has none yet.
    pub fn create_for(receiver: Actor) -> Self {
        ActorMessageQueue {
            id: ActorMessageQueueId::new(),
            receiver,
            unbundled: Vec::new(),
            bundles: Vec::new(),
            version: 0,
            committed_version: 0,
            changes: Vec::new(),
        }
    }

    pub fn id(&self) -> ActorMessageQueueId {
        self.id
    }

    pub fn receiver(&self) -> &Actor {
        &self.receiver
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Version of the state last loaded from or written to storage.
    pub fn committed_version(&self) -> u64 {
        self.committed_version
    }

    /// Changes made since the queue was loaded (not yet persisted).
    pub fn changes(&self) -> &[QueueChange] {
        &self.changes
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Called by the repository after a successful commit.
    pub fn mark_committed(&mut self) {
        self.changes.clear();
        self.committed_version = self.version;
    }

    pub fn unbundled_count(&self) -> usize {
        self.unbundled.len()
    }

    /// Enqueue time of the oldest message not yet in a bundle.
    pub fn oldest_unbundled_at(&self) -> Option<DateTime<Utc>> {
        self.unbundled.first().map(|m| m.enqueued_at)
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn bundle(&self, bundle_id: BundleId) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.id() == bundle_id)
    }

    /// Append a message in the unbundled state.
    pub fn enqueue(
        &mut self,
        message: &OutgoingMessage,
        now: DateTime<Utc>,
    ) -> Result<(), QueueError> {
        if message.receiver() != &self.receiver {
            return Err(QueueError::ReceiverMismatch {
                message: message.id(),
                expected: self.receiver.clone(),
                actual: message.receiver().clone(),
            });
        }
        if message.is_bundled() {
            return Err(QueueError::AlreadyBundled(message.id()));
        }
        if self.contains(message.id()) {
            return Err(QueueError::AlreadyEnqueued(message.id()));
        }

        let key = message.bundling_key();
        self.unbundled.push(QueuedMessage {
            id: message.id(),
            key,
            enqueued_at: now,
        });
        self.record(QueueChange::MessageEnqueued {
            message_id: message.id(),
            key,
        });
        Ok(())
    }

    /// Return the bundle to deliver next, closing a new one if needed.
    ///
    /// `None` as category peeks the whole queue (legacy protocol). An
    /// undelivered bundle in scope is returned unchanged, so repeated peeks are
    /// idempotent. Otherwise the oldest unbundled message in scope and every
    /// later unbundled message with the same bundling key, up to
    /// `max_bundle_size`, are closed into a fresh bundle.
    pub fn peek(
        &mut self,
        category: Option<MessageCategory>,
        max_bundle_size: usize,
        now: DateTime<Utc>,
    ) -> Option<BundleId> {
        let in_scope = |c: MessageCategory| category.map_or(true, |wanted| wanted == c);

        if let Some(existing) = self.bundles.iter().find(|b| in_scope(b.category())) {
            return Some(existing.id());
        }

        let key = self.unbundled.iter().find(|m| in_scope(m.key.category))?.key;
        let limit = max_bundle_size.max(1);

        let mut message_ids = Vec::new();
        self.unbundled.retain(|m| {
            if m.key == key && message_ids.len() < limit {
                message_ids.push(m.id);
                false
            } else {
                true
            }
        });

        let bundle_id = BundleId::new();
        self.bundles
            .push(Bundle::new(bundle_id, key, message_ids.clone(), now));
        self.record(QueueChange::BundleAssigned {
            bundle_id,
            message_ids,
        });
        Some(bundle_id)
    }

    /// Remove a delivered bundle and its messages. Unknown ids return `false`
    /// so acknowledgements can be retried safely.
    pub fn dequeue(&mut self, bundle_id: BundleId) -> bool {
        let Some(index) = self.bundles.iter().position(|b| b.id() == bundle_id) else {
            return false;
        };

        let bundle = self.bundles.remove(index);
        self.record(QueueChange::BundleDequeued {
            bundle_id,
            message_ids: bundle.message_ids().to_vec(),
        });
        true
    }

    fn contains(&self, message_id: OutgoingMessageId) -> bool {
        self.unbundled.iter().any(|m| m.id == message_id)
            || self
                .bundles
                .iter()
                .any(|b| b.message_ids().contains(&message_id))
    }

    fn record(&mut self, change: QueueChange) {
        self.changes.push(change);
        self.version += 1;
    }
}
