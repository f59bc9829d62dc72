//! Order storage boundary.

use std::collections::BTreeSet;

use shopdesk_core::{DomainResult, OrderId, ProductId};

use crate::order::{Order, OrderStatus};

/// Persistence port for orders.
pub trait OrderStore {
    fn order(&self, id: OrderId) -> Option<Order>;

    /// All orders, newest first, optionally narrowed to one status.
    fn orders(&self, status: Option<&OrderStatus>) -> Vec<Order>;

    /// Order ids whose line items reference any of `product_ids`, newest
    /// first. Served from the store's order-product linkage index, which may
    /// lag behind freshly written orders — callers reconcile with a recent
    /// scan (see `OwnershipIndex`).
    fn order_ids_for_products(
        &self,
        product_ids: &BTreeSet<ProductId>,
        status: Option<&OrderStatus>,
    ) -> Vec<OrderId>;

    fn set_status(&mut self, id: OrderId, status: OrderStatus) -> DomainResult<()>;

    fn add_note(&mut self, id: OrderId, note: String) -> DomainResult<()>;
}
