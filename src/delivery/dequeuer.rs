use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::retry::commit_with_retry;
use crate::config::DeliveryConfig;
use crate::error::DeliveryError;
use crate::identity::Actor;
use crate::message::BundleId;
use crate::repository::MessageStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DequeueOutcome {
    Dequeued,
    /// No queue, or no undelivered bundle with that id. Repeating an
    /// acknowledgement ends here.
    NotFound,
    /// The id is not a bundle id. Storage was not touched.
    MalformedId,
}

impl DequeueOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DequeueOutcome::Dequeued)
    }
}

/// Removes acknowledged bundles, their messages and their cached document.
pub struct MessageDequeuer<S> {
    store: Arc<S>,
    config: DeliveryConfig,
}

impl<S: MessageStore> MessageDequeuer<S> {
    pub fn new(store: Arc<S>) -> Self {
        MessageDequeuer {
            store,
            config: DeliveryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeliveryConfig) -> Self {
        self.config = config;
        self
    }

    #[instrument(skip_all, fields(receiver = %receiver, message_id = %message_id))]
    pub async fn dequeue(
        &self,
        message_id: &str,
        receiver: &Actor,
    ) -> Result<DequeueOutcome, DeliveryError> {
        let bundle_id = match BundleId::parse(message_id) {
            Ok(bundle_id) => bundle_id,
            Err(err) => {
                debug!(error = %err, "rejecting malformed bundle id");
                return Ok(DequeueOutcome::MalformedId);
            }
        };

        let this = self;
        let outcome = commit_with_retry("dequeue", self.config.max_commit_attempts, move || {
            this.try_dequeue(bundle_id, receiver)
        })
        .await?;

        match outcome {
            DequeueOutcome::Dequeued => info!(%bundle_id, "bundle dequeued"),
            _ => debug!(%bundle_id, "no undelivered bundle with that id"),
        }
        Ok(outcome)
    }

    async fn try_dequeue(
        &self,
        bundle_id: BundleId,
        receiver: &Actor,
    ) -> Result<DequeueOutcome, DeliveryError> {
        let Some(mut queue) = self.store.get_queue(receiver).await? else {
            return Ok(DequeueOutcome::NotFound);
        };
        if !queue.dequeue(bundle_id) {
            return Ok(DequeueOutcome::NotFound);
        }

        self.store.commit_queue(&mut queue, &[]).await?;
        Ok(DequeueOutcome::Dequeued)
    }
}
