//! Use cases of the pull protocol: enqueue, peek, dequeue.

mod dequeuer;
mod enqueuer;
mod peeker;
mod retry;

pub use dequeuer::{DequeueOutcome, MessageDequeuer};
pub use enqueuer::{EnqueueMessage, MessageEnqueuer};
pub use peeker::{MessagePeeker, PeekOutcome, PeekedDocument};
