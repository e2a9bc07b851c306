//! Current pull protocol: typed requests, one category per peek.

use serde::{Deserialize, Serialize};

use crate::archive::ArchivedMessageRepository;
use crate::delivery::{DequeueOutcome, MessageDequeuer, MessagePeeker, PeekOutcome};
use crate::error::DeliveryError;
use crate::identity::{Actor, ActorNumber, MarketRole};
use crate::message::{BundleId, DocumentFormat, MessageCategory};
use crate::repository::MessageStore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekRequest {
    pub actor_number: ActorNumber,
    pub actor_role: MarketRole,
    pub category: MessageCategory,
    pub format: DocumentFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekResponse {
    pub bundle_id: BundleId,
    pub payload: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DequeueRequest {
    pub message_id: String,
    pub actor_number: ActorNumber,
    pub actor_role: MarketRole,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DequeueResponse {
    pub success: bool,
}

pub async fn peek<S, A>(
    peeker: &MessagePeeker<S, A>,
    request: PeekRequest,
) -> Result<Option<PeekResponse>, DeliveryError>
where
    S: MessageStore,
    A: ArchivedMessageRepository,
{
    let actor = Actor::new(request.actor_number, request.actor_role);
    let outcome = peeker
        .peek(&actor, Some(request.category), request.format)
        .await?;

    Ok(match outcome {
        PeekOutcome::Delivered(document) => Some(PeekResponse {
            bundle_id: document.bundle_id,
            payload: document.payload,
        }),
        PeekOutcome::Empty => None,
    })
}

pub async fn dequeue<S: MessageStore>(
    dequeuer: &MessageDequeuer<S>,
    request: DequeueRequest,
) -> Result<DequeueResponse, DeliveryError> {
    let actor = Actor::new(request.actor_number, request.actor_role);
    let outcome: DequeueOutcome = dequeuer.dequeue(&request.message_id, &actor).await?;
    Ok(DequeueResponse {
        success: outcome.is_success(),
    })
}
