mod archive;
mod clock;
mod config;
mod delivery;
mod document;
mod error;
mod hashmap;
mod identity;
mod message;
pub mod protocol;
mod queue;
mod repository;

pub use archive::{ArchiveOutcome, ArchivedMessage, ArchivedMessageRepository, InMemoryArchive};
pub use clock::{Clock, SystemClock};
pub use config::{
    ConfigError, DeliveryConfig, DEFAULT_MAX_BUNDLE_SIZE, DEFAULT_MAX_COMMIT_ATTEMPTS,
};
pub use delivery::{
    DequeueOutcome, EnqueueMessage, MessageDequeuer, MessageEnqueuer, MessagePeeker,
    PeekOutcome, PeekedDocument,
};
pub use document::{DocumentError, DocumentFactory, DocumentHeader, DocumentWriter, MarketDocument};
pub use error::{DeliveryError, ParseError};
pub use hashmap::HashMapRepository;
pub use identity::{Actor, ActorNumber, MarketRole};
pub use message::{
    ActorMessageQueueId, ArchivedMessageId, BundleId, BundlingKey, BusinessReason,
    DocumentFormat, DocumentType, MessageCategory, MessageRecord, OutgoingMessage,
    OutgoingMessageId, ProcessId,
};
pub use queue::{ActorMessageQueue, Bundle, QueueChange, QueueError};
pub use repository::{
    ActorMessageQueueRepository, InsertOutcome, MarketDocumentRepository, MessageStore,
    OutgoingMessageRepository, RepositoryError,
};
