use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Opaque business payload of one outgoing message. Only the document writers
/// know its shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord(Vec<u8>);

impl MessageRecord {
    pub fn new(bytes: Vec<u8>) -> Self {
        MessageRecord(bytes)
    }

    /// Serialize a typed record as JSON.
    pub fn encode<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(record).map(MessageRecord)
    }

    /// Decode a typed record previously stored with `encode`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for MessageRecord {
    fn from(bytes: Vec<u8>) -> Self {
        MessageRecord(bytes)
    }
}

impl From<&str> for MessageRecord {
    fn from(value: &str) -> Self {
        MessageRecord(value.as_bytes().to_vec())
    }
}
