mod category;
mod document_type;
mod ids;
mod outgoing_message;
mod record;

pub use category::MessageCategory;
pub use document_type::{BusinessReason, DocumentFormat, DocumentType};
pub use ids::{ActorMessageQueueId, ArchivedMessageId, BundleId, OutgoingMessageId, ProcessId};
pub use outgoing_message::{BundlingKey, OutgoingMessage};
pub use record::MessageRecord;
