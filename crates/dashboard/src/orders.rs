//! Order listing and status changes.

use serde_json::json;

use shopdesk_audit::{AuditAction, AuditStore, record};
use shopdesk_auth::{AccessPolicy, UserContext};
use shopdesk_catalog::CatalogStore;
use shopdesk_core::{DomainError, DomainResult, OrderId, OwnershipMode, Settings};
use shopdesk_orders::{
    Order, OrderStatus, OrderStore, OwnershipIndex, accessible_product_ids, order_line_ownerships,
};

pub const PER_PAGE: usize = 20;

#[derive(Debug, Clone)]
pub struct OrderQuery {
    /// 1-based.
    pub page: usize,
    pub search: String,
    pub status: Option<OrderStatus>,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage {
    pub rows: Vec<Order>,
    pub total: usize,
}

/// Orders visible to `user`, newest first.
///
/// Restricted partners go through the cached ownership index; everyone else
/// gets the plain listing. The search box matches digits against the order
/// id, which is how customers quote order numbers.
pub fn list_orders(
    user: &UserContext,
    settings: &Settings,
    catalog: &dyn CatalogStore,
    orders: &dyn OrderStore,
    index: &OwnershipIndex,
    query: &OrderQuery,
) -> DomainResult<OrderPage> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) {
        return Err(DomainError::PermissionDenied);
    }

    let page = query.page.max(1);

    if policy.is_partner(Some(user)) && settings.ownership_mode == OwnershipMode::Restricted {
        let scope = accessible_product_ids(catalog, user.id);
        let ids = index.accessible_order_ids(
            orders,
            user.id,
            &scope,
            &query.search,
            query.status.as_ref(),
        );
        let total = ids.len();
        let rows = ids
            .into_iter()
            .skip((page - 1) * PER_PAGE)
            .take(PER_PAGE)
            .filter_map(|id| orders.order(id))
            .collect();
        return Ok(OrderPage { rows, total });
    }

    let digits: String = query.search.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut rows = orders.orders(query.status.as_ref());
    if !digits.is_empty() {
        rows.retain(|o| o.id.as_u64().to_string().contains(&digits));
    }

    let total = rows.len();
    let rows = rows
        .into_iter()
        .skip((page - 1) * PER_PAGE)
        .take(PER_PAGE)
        .collect();
    Ok(OrderPage { rows, total })
}

/// Move an order to `new_status` on behalf of `user`.
///
/// The status must come from `valid_statuses`, the platform's registered set
/// for this request. Partners additionally need the settings toggle and
/// visibility of the order; an invisible order reads as missing.
#[allow(clippy::too_many_arguments)]
pub fn update_order_status(
    user: &UserContext,
    settings: &Settings,
    catalog: &dyn CatalogStore,
    orders: &mut dyn OrderStore,
    audit: &mut dyn AuditStore,
    index: &OwnershipIndex,
    order_id: OrderId,
    new_status: OrderStatus,
    note: Option<String>,
    valid_statuses: &[OrderStatus],
) -> DomainResult<()> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) {
        return Err(DomainError::PermissionDenied);
    }
    if !settings.allow_order_status_update && !user.manage_all {
        return Err(DomainError::PermissionDenied);
    }

    let Some(order) = orders.order(order_id) else {
        return Err(DomainError::NotFound);
    };
    let owners = order_line_ownerships(catalog, &order);
    if !policy.can_view_order(Some(user), &owners) {
        return Err(DomainError::NotFound);
    }

    if !valid_statuses.contains(&new_status) {
        return Err(DomainError::validation(format!(
            "unknown order status {new_status}"
        )));
    }

    let old_status = order.status.clone();
    orders.set_status(order_id, new_status.clone())?;
    if let Some(note) = note {
        orders.add_note(order_id, note)?;
    }

    record(
        audit,
        user.id,
        AuditAction::ORDER_STATUS_CHANGE,
        order_id.as_u64(),
        "order",
        &json!({ "status": old_status }),
        &json!({ "status": new_status }),
    )?;
    index.bump();
    tracing::info!(order = %order_id, from = %old_status, to = %new_status, "order status updated");
    Ok(())
}
