use thiserror::Error;

use crate::identity::Actor;
use crate::message::OutgoingMessageId;

/// Misuse of the queue aggregate. These are programmer errors, not steady-state
/// outcomes: "nothing to deliver" and "unknown bundle" are ordinary results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("message {message} is addressed to {actual}, not to queue owner {expected}")]
    ReceiverMismatch {
        message: OutgoingMessageId,
        expected: Actor,
        actual: Actor,
    },
    #[error("message {0} is already bundled and cannot be enqueued")]
    AlreadyBundled(OutgoingMessageId),
    #[error("message {0} is already in the queue")]
    AlreadyEnqueued(OutgoingMessageId),
}
