use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{BundleId, DocumentFormat};

/// Rendered wire document of a bundle. Written once per bundle; its presence
/// means the bundle has been rendered and archived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDocument {
    bundle_id: BundleId,
    format: DocumentFormat,
    payload: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl MarketDocument {
    pub fn new(
        bundle_id: BundleId,
        format: DocumentFormat,
        payload: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        MarketDocument {
            bundle_id,
            format,
            payload,
            created_at,
        }
    }

    pub fn bundle_id(&self) -> BundleId {
        self.bundle_id
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
