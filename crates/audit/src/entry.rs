//! Audit log rows.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{AuditEntryId, UserId};

/// Action slug recorded with each entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditAction(Cow<'static, str>);

impl AuditAction {
    pub const PRODUCT_CREATE: AuditAction = AuditAction(Cow::Borrowed("product_create"));
    pub const PRODUCT_EDIT: AuditAction = AuditAction(Cow::Borrowed("product_edit"));
    pub const PRODUCT_BULK_UPDATE: AuditAction = AuditAction(Cow::Borrowed("product_bulk_update"));
    pub const ORDER_STATUS_CHANGE: AuditAction = AuditAction(Cow::Borrowed("order_status_change"));
    pub const PRODUCT_CHANGE_REQUESTED: AuditAction =
        AuditAction(Cow::Borrowed("product_change_requested"));
    pub const PRODUCT_CHANGE_APPROVED: AuditAction =
        AuditAction(Cow::Borrowed("product_change_approved"));
    pub const PRODUCT_CHANGE_REJECTED: AuditAction =
        AuditAction(Cow::Borrowed("product_change_rejected"));

    pub fn new(slug: impl Into<Cow<'static, str>>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded entry. Snapshots are kept as loose JSON so the trail survives
/// schema drift in the objects it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub user_id: UserId,
    pub action: AuditAction,
    pub object_id: u64,
    pub object_type: String,
    pub before: serde_json::Value,
    pub after: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Entry as handed to the store; id and timestamp are assigned on append.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub user_id: UserId,
    pub action: AuditAction,
    pub object_id: u64,
    pub object_type: String,
    pub before: serde_json::Value,
    pub after: serde_json::Value,
}
