mod actor_message_queue;
mod bundle;
mod change;
mod error;

pub use actor_message_queue::ActorMessageQueue;
pub use bundle::Bundle;
pub use change::QueueChange;
pub use error::QueueError;
