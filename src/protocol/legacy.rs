//! Legacy pull protocol: string DTOs, peeks across every category.

use serde::{Deserialize, Serialize};

use crate::archive::ArchivedMessageRepository;
use crate::delivery::{MessageDequeuer, MessagePeeker, PeekOutcome};
use crate::error::DeliveryError;
use crate::identity::{Actor, ActorNumber, MarketRole};
use crate::message::DocumentFormat;
use crate::repository::MessageStore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekRequestDto {
    pub actor_number: String,
    pub actor_role: String,
    pub document_format: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DequeueRequestDto {
    pub message_id: String,
    pub actor_number: String,
    pub actor_role: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekResultDto {
    pub message_id: Option<String>,
    pub bundle: Option<Vec<u8>>,
}

impl PeekResultDto {
    pub fn empty() -> Self {
        PeekResultDto {
            message_id: None,
            bundle: None,
        }
    }
}

fn actor(number: &str, role: &str) -> Result<Actor, DeliveryError> {
    Ok(Actor::new(ActorNumber::parse(number)?, MarketRole::parse(role)?))
}

pub async fn peek<S, A>(
    peeker: &MessagePeeker<S, A>,
    request: PeekRequestDto,
) -> Result<PeekResultDto, DeliveryError>
where
    S: MessageStore,
    A: ArchivedMessageRepository,
{
    let actor = actor(&request.actor_number, &request.actor_role)?;
    let format = DocumentFormat::parse(&request.document_format)?;

    Ok(match peeker.peek(&actor, None, format).await? {
        PeekOutcome::Delivered(document) => PeekResultDto {
            message_id: Some(document.bundle_id.to_string()),
            bundle: Some(document.payload),
        },
        PeekOutcome::Empty => PeekResultDto::empty(),
    })
}

/// `true` when the bundle was removed.
pub async fn dequeue<S: MessageStore>(
    dequeuer: &MessageDequeuer<S>,
    request: DequeueRequestDto,
) -> Result<bool, DeliveryError> {
    let actor = actor(&request.actor_number, &request.actor_role)?;
    let outcome = dequeuer.dequeue(&request.message_id, &actor).await?;
    Ok(outcome.is_success())
}
