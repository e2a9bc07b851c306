use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentHeader;
use crate::identity::Actor;
use crate::message::{ArchivedMessageId, BundleId, BusinessReason, DocumentFormat, DocumentType};

/// Audit copy of a delivered document. Outlives the queue: dequeue never
/// removes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedMessage {
    pub id: ArchivedMessageId,
    pub bundle_id: BundleId,
    pub document_type: DocumentType,
    pub business_reason: BusinessReason,
    pub sender: Actor,
    pub receiver: Actor,
    pub format: DocumentFormat,
    pub payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl ArchivedMessage {
    pub fn outgoing(header: &DocumentHeader, format: DocumentFormat, payload: Vec<u8>) -> Self {
        ArchivedMessage {
            id: ArchivedMessageId::new(),
            bundle_id: header.document_id,
            document_type: header.document_type,
            business_reason: header.business_reason,
            sender: header.sender.clone(),
            receiver: header.receiver.clone(),
            format,
            payload,
            created_at: header.created_at,
        }
    }
}
