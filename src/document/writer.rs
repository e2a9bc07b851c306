use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentError;
use crate::identity::Actor;
use crate::message::{
    BundleId, BusinessReason, DocumentFormat, DocumentType, MessageRecord, OutgoingMessage,
};
use crate::queue::Bundle;

/// Document-level fields shared by every record in a bundle.
///
/// Derived only from the bundle and its stored messages, so rendering the same
/// bundle twice produces the same header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub document_id: BundleId,
    pub document_type: DocumentType,
    pub business_reason: BusinessReason,
    pub sender: Actor,
    pub receiver: Actor,
    pub created_at: DateTime<Utc>,
}

impl DocumentHeader {
    pub fn for_bundle(
        bundle: &Bundle,
        receiver: &Actor,
        messages: &[OutgoingMessage],
    ) -> Result<Self, DocumentError> {
        let first = messages
            .first()
            .ok_or_else(|| DocumentError::EmptyBundle(bundle.id().to_string()))?;

        let key = bundle.key();
        Ok(DocumentHeader {
            document_id: bundle.id(),
            document_type: key.document_type,
            business_reason: key.business_reason,
            sender: first.sender().clone(),
            receiver: receiver.clone(),
            created_at: bundle.created_at(),
        })
    }
}

/// Format-specific renderer for one or more document types.
pub trait DocumentWriter: Send + Sync {
    fn handles_type(&self, document_type: DocumentType) -> bool;

    fn handles_format(&self, format: DocumentFormat) -> bool;

    fn write(
        &self,
        header: &DocumentHeader,
        records: &[MessageRecord],
    ) -> Result<Vec<u8>, DocumentError>;
}
