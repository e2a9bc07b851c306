use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            pub fn from_uuid(value: Uuid) -> Self {
                $name(value)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn parse(value: &str) -> Result<Self, ParseError> {
                Uuid::parse_str(value.trim())
                    .map($name)
                    .map_err(|_| ParseError::Id {
                        kind: $label,
                        value: value.to_string(),
                    })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

uuid_id!(
    /// Identifies a set of outgoing messages delivered as one document.
    /// Assigned at peek time and never changed afterwards.
    BundleId,
    "bundle id"
);

uuid_id!(OutgoingMessageId, "outgoing message id");

uuid_id!(
    /// Business process that produced a message.
    ProcessId,
    "process id"
);

uuid_id!(ActorMessageQueueId, "queue id");

uuid_id!(ArchivedMessageId, "archived message id");
