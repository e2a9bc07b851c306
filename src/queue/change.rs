use crate::message::{BundleId, BundlingKey, OutgoingMessageId};

/// State change recorded by the aggregate and not yet persisted.
///
/// Each variant maps to one set-based storage statement: insert a message row,
/// assign a bundle id to unbundled rows, delete rows by bundle id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueChange {
    MessageEnqueued {
        message_id: OutgoingMessageId,
        key: BundlingKey,
    },
    BundleAssigned {
        bundle_id: BundleId,
        message_ids: Vec<OutgoingMessageId>,
    },
    BundleDequeued {
        bundle_id: BundleId,
        message_ids: Vec<OutgoingMessageId>,
    },
}

impl QueueChange {
    pub fn name(&self) -> &'static str {
        match self {
            QueueChange::MessageEnqueued { .. } => "MessageEnqueued",
            QueueChange::BundleAssigned { .. } => "BundleAssigned",
            QueueChange::BundleDequeued { .. } => "BundleDequeued",
        }
    }
}
