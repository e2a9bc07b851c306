use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::retry::commit_with_retry;
use crate::archive::{ArchivedMessage, ArchivedMessageRepository};
use crate::clock::{Clock, SystemClock};
use crate::config::DeliveryConfig;
use crate::document::{DocumentFactory, DocumentHeader, MarketDocument};
use crate::error::DeliveryError;
use crate::identity::Actor;
use crate::message::{BundleId, DocumentFormat, DocumentType, MessageCategory};
use crate::queue::Bundle;
use crate::repository::{MessageStore, RepositoryError};

/// The document delivered for a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeekedDocument {
    pub bundle_id: BundleId,
    pub document_type: DocumentType,
    pub format: DocumentFormat,
    pub payload: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeekOutcome {
    Delivered(PeekedDocument),
    /// Nothing to deliver in the requested scope.
    Empty,
}

impl PeekOutcome {
    pub fn bundle_id(&self) -> Option<BundleId> {
        match self {
            PeekOutcome::Delivered(document) => Some(document.bundle_id),
            PeekOutcome::Empty => None,
        }
    }

    pub fn into_document(self) -> Option<PeekedDocument> {
        match self {
            PeekOutcome::Delivered(document) => Some(document),
            PeekOutcome::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PeekOutcome::Empty)
    }
}

/// Closes the next bundle of a queue and materializes its document.
///
/// Bundling is committed before any rendering starts, so a concurrent enqueue
/// never lands in a bundle that is already being rendered. Materialization is
/// fetch-or-create against the document cache: a bundle is rendered and
/// archived at most once, and every peek of it returns the same bytes.
pub struct MessagePeeker<S, A> {
    store: Arc<S>,
    archive: Arc<A>,
    factory: Arc<DocumentFactory>,
    clock: Arc<dyn Clock>,
    config: DeliveryConfig,
}

impl<S, A> MessagePeeker<S, A>
where
    S: MessageStore,
    A: ArchivedMessageRepository,
{
    pub fn new(store: Arc<S>, archive: Arc<A>, factory: Arc<DocumentFactory>) -> Self {
        MessagePeeker {
            store,
            archive,
            factory,
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

    /// Peek the receiver's queue. `None` as category, or a format that
    /// ignores categories, peeks across the whole queue.
    #[instrument(
        skip_all,
        fields(receiver = %receiver, category = ?category, %format)
    )]
    pub async fn peek(
        &self,
        receiver: &Actor,
        category: Option<MessageCategory>,
        format: DocumentFormat,
    ) -> Result<PeekOutcome, DeliveryError> {
        let scope = if format.ignores_category() {
            None
        } else {
            category
        };

        let this = self;
        let bundle = commit_with_retry("peek", self.config.max_commit_attempts, move || {
            this.close_bundle(receiver, scope)
        })
        .await?;

        let Some(bundle) = bundle else {
            debug!("nothing to deliver");
            return Ok(PeekOutcome::Empty);
        };

        self.materialize(receiver, &bundle, format).await
    }

    /// Return the undelivered bundle in scope, closing a new one if needed,
    /// with the assignment committed.
    async fn close_bundle(
        &self,
        receiver: &Actor,
        scope: Option<MessageCategory>,
    ) -> Result<Option<Bundle>, DeliveryError> {
        let Some(mut queue) = self.store.get_queue(receiver).await? else {
            return Ok(None);
        };
        let oldest_enqueued_at = queue.oldest_unbundled_at();
        let Some(bundle_id) = queue.peek(scope, self.config.max_bundle_size, self.clock.now())
        else {
            return Ok(None);
        };

        let bundle = queue.bundle(bundle_id).cloned().ok_or_else(|| {
            RepositoryError::Inconsistent(format!("bundle {} missing after peek", bundle_id))
        })?;

        if queue.has_uncommitted_changes() {
            self.store.commit_queue(&mut queue, &[]).await?;
            info!(
                %bundle_id,
                messages = bundle.message_count(),
                oldest_enqueued_at = ?oldest_enqueued_at,
                "bundle assigned"
            );
        }

        Ok(Some(bundle))
    }

    async fn materialize(
        &self,
        receiver: &Actor,
        bundle: &Bundle,
        format: DocumentFormat,
    ) -> Result<PeekOutcome, DeliveryError> {
        let bundle_id = bundle.id();

        if let Some(document) = self.store.get_document(bundle_id).await? {
            debug!(%bundle_id, "serving cached document");
            return Ok(delivered(bundle, document));
        }

        let messages = self.store.get_bundle_messages(bundle_id).await?;
        if messages.is_empty() {
            // Dequeued by a concurrent acknowledgement since it was closed.
            debug!(%bundle_id, "bundle gone before materialization");
            return Ok(PeekOutcome::Empty);
        }

        let header = DocumentHeader::for_bundle(bundle, receiver, &messages)?;
        let payload = self.factory.create(&header, &messages, format)?;

        let archived = self
            .archive
            .add(ArchivedMessage::outgoing(&header, format, payload))
            .await?;
        if !archived.was_inserted() {
            debug!(%bundle_id, "bundle already archived by a concurrent peek");
        }
        let archived = archived.into_inner();

        let Some(cached) = self
            .store
            .insert_document(MarketDocument::new(
                bundle_id,
                archived.format,
                archived.payload,
                header.created_at,
            ))
            .await?
        else {
            debug!(%bundle_id, "bundle dequeued during materialization");
            return Ok(PeekOutcome::Empty);
        };
        let document = cached.into_inner();

        info!(
            %bundle_id,
            messages = messages.len(),
            bytes = document.payload().len(),
            "document materialized"
        );
        Ok(delivered(bundle, document))
    }
}

fn delivered(bundle: &Bundle, document: MarketDocument) -> PeekOutcome {
    PeekOutcome::Delivered(PeekedDocument {
        bundle_id: bundle.id(),
        document_type: bundle.document_type(),
        format: document.format(),
        payload: document.into_payload(),
    })
}
