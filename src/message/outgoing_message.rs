use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BundleId, BusinessReason, DocumentType, MessageCategory, MessageRecord, OutgoingMessageId,
    ProcessId,
};
use crate::identity::Actor;

/// Messages sharing a key can be rendered into the same document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundlingKey {
    pub category: MessageCategory,
    pub document_type: DocumentType,
    pub business_reason: BusinessReason,
}

/// One business document instance addressed to a receiver.
///
/// Immutable apart from the bundle assignment, which happens once at peek time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    id: OutgoingMessageId,
    document_type: DocumentType,
    business_reason: BusinessReason,
    receiver: Actor,
    sender: Actor,
    process_id: ProcessId,
    record: MessageRecord,
    bundle_id: Option<BundleId>,
    created_at: DateTime<Utc>,
}

impl OutgoingMessage {
    pub fn new(
        document_type: DocumentType,
        business_reason: BusinessReason,
        receiver: Actor,
        sender: Actor,
        process_id: ProcessId,
        record: MessageRecord,
        created_at: DateTime<Utc>,
    ) -> Self {
        OutgoingMessage {
            id: OutgoingMessageId::new(),
            document_type,
            business_reason,
            receiver,
            sender,
            process_id,
            record,
            bundle_id: None,
            created_at,
        }
    }

    pub fn id(&self) -> OutgoingMessageId {
        self.id
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn business_reason(&self) -> BusinessReason {
        self.business_reason
    }

    pub fn category(&self) -> MessageCategory {
        self.document_type.category()
    }

    pub fn bundling_key(&self) -> BundlingKey {
        BundlingKey {
            category: self.category(),
            document_type: self.document_type,
            business_reason: self.business_reason,
        }
    }

    pub fn receiver(&self) -> &Actor {
        &self.receiver
    }

    pub fn sender(&self) -> &Actor {
        &self.sender
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    pub fn record(&self) -> &MessageRecord {
        &self.record
    }

    pub fn bundle_id(&self) -> Option<BundleId> {
        self.bundle_id
    }

    pub fn is_bundled(&self) -> bool {
        self.bundle_id.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attach the message to a bundle. Returns `false` when it already belongs
    /// to one; a bundled message is never moved.
    pub fn assign_to_bundle(&mut self, bundle_id: BundleId) -> bool {
        if self.bundle_id.is_some() {
            return false;
        }
        self.bundle_id = Some(bundle_id);
        true
    }
}
