//! Queue and review operations.

use serde_json::json;

use shopdesk_audit::{AuditAction, AuditStore, record};
use shopdesk_catalog::{CatalogStore, ProductPayload, ProductSnapshot, apply_payload};
use shopdesk_core::{DomainError, DomainResult, ProductId, RequestId, UserId};

use crate::diff::build_diff;
use crate::request::{ChangeRequestView, RequestStatus};
use crate::store::ApprovalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Queue a proposed change for review instead of applying it.
///
/// `target` is `None` when the partner proposes a brand-new product. Nothing
/// touches the live catalog here; the payload sits in the queue until a
/// reviewer decides.
pub fn create_request(
    approvals: &mut dyn ApprovalStore,
    audit: &mut dyn AuditStore,
    requester: UserId,
    target: Option<ProductId>,
    before: &ProductSnapshot,
    payload: &ProductPayload,
) -> DomainResult<RequestId> {
    let before_json = serde_json::to_string(before)
        .map_err(|e| DomainError::persistence(format!("encode snapshot: {e}")))?;
    let payload_json = serde_json::to_string(payload)
        .map_err(|e| DomainError::persistence(format!("encode payload: {e}")))?;

    let id = approvals.insert(requester, target, before_json, payload_json)?;
    record(
        audit,
        requester,
        AuditAction::PRODUCT_CHANGE_REQUESTED,
        id.as_u64(),
        "change_request",
        before,
        payload,
    )?;
    tracing::info!(request = %id, target = ?target, "change request queued");
    Ok(id)
}

/// Decide a pending request.
///
/// Returns `Ok(true)` when this call moved the request to its terminal state,
/// `Ok(false)` when someone else already decided it. Approval applies the
/// stored payload to the live catalog on behalf of the original requester; if
/// applying fails the request stays pending and the error propagates.
pub fn review(
    approvals: &mut dyn ApprovalStore,
    catalog: &mut dyn CatalogStore,
    audit: &mut dyn AuditStore,
    reviewer: UserId,
    request_id: RequestId,
    decision: Decision,
) -> DomainResult<bool> {
    let request = approvals.get(request_id).ok_or(DomainError::NotFound)?;
    if request.status != RequestStatus::Pending {
        return Ok(false);
    }

    match decision {
        Decision::Reject => {
            if !approvals.try_transition(
                request_id,
                RequestStatus::Pending,
                RequestStatus::Rejected,
            ) {
                return Ok(false);
            }
            record(
                audit,
                reviewer,
                AuditAction::PRODUCT_CHANGE_REJECTED,
                request_id.as_u64(),
                "change_request",
                &json!({ "status": RequestStatus::Pending }),
                &json!({ "status": RequestStatus::Rejected }),
            )?;
            tracing::info!(request = %request_id, %reviewer, "change request rejected");
            Ok(true)
        }
        Decision::Approve => {
            let (_, payload) = request.decode();
            // Apply runs before the transition so a failed apply leaves the
            // request pending. With shared storage a lost transition after a
            // successful apply re-applies the same payload the winner applied.
            let product_id = apply_payload(catalog, request.product_id, &payload, request.user_id)?;

            if !approvals.try_transition(
                request_id,
                RequestStatus::Pending,
                RequestStatus::Approved,
            ) {
                return Ok(false);
            }
            approvals.set_target(request_id, product_id)?;
            record(
                audit,
                reviewer,
                AuditAction::PRODUCT_CHANGE_APPROVED,
                request_id.as_u64(),
                "change_request",
                &json!({ "status": RequestStatus::Pending }),
                &json!({ "status": RequestStatus::Approved, "product_id": product_id }),
            )?;
            tracing::info!(
                request = %request_id,
                product = %product_id,
                %reviewer,
                "change request approved"
            );
            Ok(true)
        }
    }
}

/// One page of decoded requests with their diffs, newest first.
pub fn requests(
    approvals: &dyn ApprovalStore,
    status: Option<RequestStatus>,
    page: usize,
    per_page: usize,
) -> (Vec<ChangeRequestView>, usize) {
    let total = approvals.count(status);
    let views = approvals
        .list(status, page, per_page)
        .into_iter()
        .map(|request| {
            let (before, payload) = request.decode();
            let before_value = serde_json::to_value(&before).unwrap_or_default();
            let payload_value = serde_json::to_value(&payload).unwrap_or_default();
            ChangeRequestView {
                id: request.id,
                user_id: request.user_id,
                product_id: request.product_id,
                status: request.status,
                diff: build_diff(&before_value, &payload_value),
                before,
                payload,
                created_at: request.created_at,
            }
        })
        .collect();
    (views, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryApprovals;
    use shopdesk_audit::MemoryAudit;
    use shopdesk_catalog::{MemoryCatalog, Product, Variant, snapshot};
    use shopdesk_core::VariantId;

    fn seed_product(catalog: &mut MemoryCatalog, author: UserId) -> ProductId {
        let mut product = Product::new(author);
        product.name = "Mug".into();
        product.regular_price = "12.50".into();
        catalog.save_product(product).unwrap()
    }

    fn price_change(target: ProductId) -> ProductPayload {
        ProductPayload {
            product_id: Some(target),
            regular_price: Some("14.00".into()),
            ..ProductPayload::default()
        }
    }

    fn queue(
        approvals: &mut MemoryApprovals,
        audit: &mut MemoryAudit,
        catalog: &MemoryCatalog,
        requester: UserId,
        target: ProductId,
        payload: &ProductPayload,
    ) -> RequestId {
        let product = catalog.product(target).unwrap();
        let before = snapshot(&product, &catalog.variants(target));
        create_request(approvals, audit, requester, Some(target), &before, payload).unwrap()
    }

    #[test]
    fn queued_change_leaves_live_product_untouched() {
        let mut catalog = MemoryCatalog::new();
        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let partner = UserId::new(7);
        let product = seed_product(&mut catalog, partner);

        let payload = price_change(product);
        let id = queue(
            &mut approvals,
            &mut audit,
            &catalog,
            partner,
            product,
            &payload,
        );

        assert_eq!(catalog.product(product).unwrap().regular_price, "12.50");
        assert_eq!(approvals.get(id).unwrap().status, RequestStatus::Pending);
        assert_eq!(audit.total(), 1);
    }

    #[test]
    fn approve_applies_payload_and_second_approval_is_a_noop() {
        let mut catalog = MemoryCatalog::new();
        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let partner = UserId::new(7);
        let reviewer = UserId::new(1);
        let product = seed_product(&mut catalog, partner);

        let payload = price_change(product);
        let id = queue(
            &mut approvals,
            &mut audit,
            &catalog,
            partner,
            product,
            &payload,
        );

        let first = review(
            &mut approvals,
            &mut catalog,
            &mut audit,
            reviewer,
            id,
            Decision::Approve,
        )
        .unwrap();
        assert!(first);
        assert_eq!(catalog.product(product).unwrap().regular_price, "14.00");

        let second = review(
            &mut approvals,
            &mut catalog,
            &mut audit,
            reviewer,
            id,
            Decision::Approve,
        )
        .unwrap();
        assert!(!second);
        // One requested + one approved entry, nothing for the losing call.
        assert_eq!(audit.total(), 2);
    }

    #[test]
    fn reject_never_touches_the_catalog() {
        let mut catalog = MemoryCatalog::new();
        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let partner = UserId::new(7);
        let product = seed_product(&mut catalog, partner);

        let payload = price_change(product);
        let id = queue(
            &mut approvals,
            &mut audit,
            &catalog,
            partner,
            product,
            &payload,
        );

        let decided = review(
            &mut approvals,
            &mut catalog,
            &mut audit,
            UserId::new(1),
            id,
            Decision::Reject,
        )
        .unwrap();
        assert!(decided);
        assert_eq!(catalog.product(product).unwrap().regular_price, "12.50");
        assert_eq!(approvals.get(id).unwrap().status, RequestStatus::Rejected);

        // A rejected request cannot later be approved.
        let late = review(
            &mut approvals,
            &mut catalog,
            &mut audit,
            UserId::new(1),
            id,
            Decision::Approve,
        )
        .unwrap();
        assert!(!late);
    }

    #[test]
    fn approving_a_new_product_request_records_the_created_id() {
        let mut catalog = MemoryCatalog::new();
        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let partner = UserId::new(7);

        let payload = ProductPayload {
            name: Some("Poster".into()),
            regular_price: Some("5".into()),
            ..ProductPayload::default()
        };
        let id = create_request(
            &mut approvals,
            &mut audit,
            partner,
            None,
            &Default::default(),
            &payload,
        )
        .unwrap();

        assert!(
            review(
                &mut approvals,
                &mut catalog,
                &mut audit,
                UserId::new(1),
                id,
                Decision::Approve,
            )
            .unwrap()
        );

        let request = approvals.get(id).unwrap();
        let created = request.product_id.unwrap();
        let product = catalog.product(created).unwrap();
        assert_eq!(product.name, "Poster");
        // Created on behalf of the requester, not the reviewer.
        assert_eq!(product.author, partner);
    }

    #[test]
    fn failed_apply_leaves_request_pending() {
        struct FailingCatalog(MemoryCatalog);

        impl CatalogStore for FailingCatalog {
            fn product(&self, id: ProductId) -> Option<Product> {
                self.0.product(id)
            }
            fn products(&self) -> Vec<Product> {
                self.0.products()
            }
            fn save_product(&mut self, _product: Product) -> DomainResult<ProductId> {
                Err(DomainError::persistence("disk full"))
            }
            fn variant(&self, id: VariantId) -> Option<Variant> {
                self.0.variant(id)
            }
            fn variants(&self, parent: ProductId) -> Vec<Variant> {
                self.0.variants(parent)
            }
            fn save_variant(&mut self, variant: Variant) -> DomainResult<VariantId> {
                self.0.save_variant(variant)
            }
        }

        let mut inner = MemoryCatalog::new();
        let partner = UserId::new(7);
        let product = seed_product(&mut inner, partner);
        let mut catalog = FailingCatalog(inner);

        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let payload = price_change(product);
        let before = snapshot(&catalog.product(product).unwrap(), &[]);
        let id = create_request(
            &mut approvals,
            &mut audit,
            partner,
            Some(product),
            &before,
            &payload,
        )
        .unwrap();

        let err = review(
            &mut approvals,
            &mut catalog,
            &mut audit,
            UserId::new(1),
            id,
            Decision::Approve,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert_eq!(approvals.get(id).unwrap().status, RequestStatus::Pending);
    }

    #[test]
    fn listing_decodes_requests_and_builds_diffs() {
        let mut catalog = MemoryCatalog::new();
        let mut approvals = MemoryApprovals::new();
        let mut audit = MemoryAudit::new();
        let partner = UserId::new(7);
        let product = seed_product(&mut catalog, partner);

        let payload = price_change(product);
        queue(
            &mut approvals,
            &mut audit,
            &catalog,
            partner,
            product,
            &payload,
        );

        let (views, total) = requests(&approvals, Some(RequestStatus::Pending), 1, 10);
        assert_eq!(total, 1);
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.payload.regular_price.as_deref(), Some("14.00"));
        assert_eq!(view.diff.len(), 1);
        assert_eq!(view.diff["regular_price"].to, serde_json::json!("14.00"));
    }

    #[test]
    fn malformed_stored_json_lists_as_defaults() {
        let mut approvals = MemoryApprovals::new();
        let id = approvals
            .insert(
                UserId::new(7),
                None,
                "{not json".into(),
                "also not json".into(),
            )
            .unwrap();

        let (views, total) = requests(&approvals, None, 1, 10);
        assert_eq!(total, 1);
        assert_eq!(views[0].id, id);
        assert_eq!(views[0].before, Default::default());
        assert!(views[0].diff.is_empty());
    }
}
