//! Change request rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_catalog::{ProductPayload, ProductSnapshot};
use shopdesk_core::{ProductId, RequestId, UserId};

use crate::diff::FieldChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// A queued change as persisted. Snapshots are stored as JSON text so a row
/// written by an older build still lists and reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: RequestId,
    pub user_id: UserId,
    /// `None` while the request proposes a brand-new product; filled in with
    /// the created id once approved.
    pub product_id: Option<ProductId>,
    pub status: RequestStatus,
    pub before_json: String,
    pub payload_json: String,
    pub created_at: DateTime<Utc>,
}

impl ChangeRequest {
    /// Decode the stored blobs. Malformed JSON decodes to defaults rather
    /// than failing the whole listing.
    pub fn decode(&self) -> (ProductSnapshot, ProductPayload) {
        let before = serde_json::from_str(&self.before_json).unwrap_or_default();
        let payload = serde_json::from_str(&self.payload_json).unwrap_or_default();
        (before, payload)
    }
}

/// Decoded request plus its field-level diff, for review screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRequestView {
    pub id: RequestId,
    pub user_id: UserId,
    pub product_id: Option<ProductId>,
    pub status: RequestStatus,
    pub before: ProductSnapshot,
    pub payload: ProductPayload,
    pub diff: BTreeMap<String, FieldChange>,
    pub created_at: DateTime<Utc>,
}
