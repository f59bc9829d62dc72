//! Audit storage boundary.

use serde::Serialize;

use shopdesk_core::{AuditEntryId, DomainError, DomainResult, UserId};

use crate::entry::{AuditAction, AuditEntry, NewAuditEntry};
use crate::query::{AuditPage, AuditQuery};

/// Append-only persistence port. There is deliberately no update or delete.
pub trait AuditStore {
    fn append(&mut self, entry: NewAuditEntry) -> DomainResult<AuditEntryId>;

    fn query(&self, query: &AuditQuery) -> AuditPage;

    /// Distinct action slugs present in the log, for filter dropdowns.
    fn distinct_actions(&self) -> Vec<AuditAction>;

    fn total(&self) -> usize;

    fn entry(&self, id: AuditEntryId) -> Option<AuditEntry>;
}

/// Serialize both snapshots and append one entry.
pub fn record<B: Serialize, A: Serialize>(
    store: &mut dyn AuditStore,
    actor: UserId,
    action: AuditAction,
    object_id: u64,
    object_type: &str,
    before: &B,
    after: &A,
) -> DomainResult<AuditEntryId> {
    let before = serde_json::to_value(before)
        .map_err(|e| DomainError::persistence(format!("audit snapshot: {e}")))?;
    let after = serde_json::to_value(after)
        .map_err(|e| DomainError::persistence(format!("audit snapshot: {e}")))?;
    let id = store.append(NewAuditEntry {
        user_id: actor,
        action: action.clone(),
        object_id,
        object_type: object_type.to_owned(),
        before,
        after,
    })?;
    tracing::debug!(%actor, %action, object_id, object_type, "audit entry recorded");
    Ok(id)
}
