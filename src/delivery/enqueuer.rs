use std::slice;
use std::sync::Arc;

use tracing::{info, instrument};

use super::retry::commit_with_retry;
use crate::clock::{Clock, SystemClock};
use crate::config::DeliveryConfig;
use crate::error::DeliveryError;
use crate::identity::Actor;
use crate::message::{
    BusinessReason, DocumentType, MessageRecord, OutgoingMessage, OutgoingMessageId, ProcessId,
};
use crate::queue::ActorMessageQueue;
use crate::repository::MessageStore;

/// One business document addressed to a receiver, as handed over by upstream
/// processing.
#[derive(Clone, Debug, PartialEq)]
pub struct EnqueueMessage {
    pub document_type: DocumentType,
    pub business_reason: BusinessReason,
    pub receiver: Actor,
    pub sender: Actor,
    pub process_id: ProcessId,
    pub record: MessageRecord,
}

/// Appends outgoing messages to their receiver's queue.
pub struct MessageEnqueuer<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: DeliveryConfig,
}

impl<S: MessageStore> MessageEnqueuer<S> {
    pub fn new(store: Arc<S>) -> Self {
        MessageEnqueuer {
            store,
            clock: Arc::new(SystemClock),
            config: DeliveryConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: DeliveryConfig) -> Self {
        self.config = config;
        self
    }

    /// Persist the message and its queue membership as one unit. Returns once
    /// both are committed.
    #[instrument(
        skip_all,
        fields(
            receiver = %input.receiver,
            document_type = %input.document_type,
            process_id = %input.process_id,
        )
    )]
    pub async fn enqueue(&self, input: EnqueueMessage) -> Result<OutgoingMessageId, DeliveryError> {
        let now = self.clock.now();
        let message = OutgoingMessage::new(
            input.document_type,
            input.business_reason,
            input.receiver,
            input.sender,
            input.process_id,
            input.record,
            now,
        );

        let this = self;
        let message = &message;
        commit_with_retry("enqueue", self.config.max_commit_attempts, move || {
            this.try_enqueue(message)
        })
        .await?;

        info!(message_id = %message.id(), category = %message.category(), "message enqueued");
        Ok(message.id())
    }

    async fn try_enqueue(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let mut queue = match self.store.get_queue(message.receiver()).await? {
            Some(queue) => queue,
            None => ActorMessageQueue::create_for(message.receiver().clone()),
        };

        queue.enqueue(message, message.created_at())?;
        self.store
            .commit_queue(&mut queue, slice::from_ref(message))
            .await?;
        Ok(())
    }
}
