use chrono::{DateTime, Utc};

use crate::message::{
    BundleId, BundlingKey, DocumentType, MessageCategory, OutgoingMessageId,
};

/// A closed, not yet dequeued group of messages. Its membership never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    id: BundleId,
    key: BundlingKey,
    message_ids: Vec<OutgoingMessageId>,
    created_at: DateTime<Utc>,
}

impl Bundle {
    pub(crate) fn new(
        id: BundleId,
        key: BundlingKey,
        message_ids: Vec<OutgoingMessageId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Bundle {
            id,
            key,
            message_ids,
            created_at,
        }
    }

    pub fn id(&self) -> BundleId {
        self.id
    }

    pub fn key(&self) -> BundlingKey {
        self.key
    }

    pub fn category(&self) -> MessageCategory {
        self.key.category
    }

    pub fn document_type(&self) -> DocumentType {
        self.key.document_type
    }

    pub fn message_ids(&self) -> &[OutgoingMessageId] {
        &self.message_ids
    }

    pub fn message_count(&self) -> usize {
        self.message_ids.len()
    }

    /// Time the bundle was closed by a peek.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
