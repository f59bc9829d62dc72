//! Reviewing queued change requests.

use shopdesk_approvals::{ApprovalStore, Decision, review};
use shopdesk_audit::AuditStore;
use shopdesk_auth::{AccessPolicy, UserContext};
use shopdesk_catalog::CatalogStore;
use shopdesk_core::{DomainError, DomainResult, RequestId, Settings};
use shopdesk_orders::OwnershipIndex;

/// Decide a pending change request on behalf of `user`.
///
/// Reviewing is reserved for admin-capability users. An approval mutates the
/// live catalog, so it bumps the ownership index the same way every direct
/// dashboard mutation does.
pub fn decide_request(
    user: &UserContext,
    settings: &Settings,
    catalog: &mut dyn CatalogStore,
    approvals: &mut dyn ApprovalStore,
    audit: &mut dyn AuditStore,
    index: &OwnershipIndex,
    request_id: RequestId,
    decision: Decision,
) -> DomainResult<bool> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) || !user.manage_all {
        return Err(DomainError::PermissionDenied);
    }

    let decided = review(approvals, catalog, audit, user.id, request_id, decision)?;
    if decided && decision == Decision::Approve {
        index.bump();
    }
    Ok(decided)
}
