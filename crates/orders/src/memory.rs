//! In-memory order store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use shopdesk_core::{DomainError, DomainResult, OrderId, ProductId};

use crate::order::{LineItem, Order, OrderStatus};
use crate::store::OrderStore;

/// In-memory [`OrderStore`].
///
/// Reference implementation for tests/dev. The order-product linkage index
/// is maintained separately from the order rows so that tests can reproduce
/// the platform's indexing lag: [`MemoryOrders::insert_unindexed`] stores an
/// order that the linkage lookup cannot see until [`MemoryOrders::reindex`].
#[derive(Debug, Default)]
pub struct MemoryOrders {
    orders: BTreeMap<OrderId, Order>,
    notes: BTreeMap<OrderId, Vec<String>>,
    /// (product, order) pairs visible to the linkage lookup.
    linkage: BTreeSet<(ProductId, OrderId)>,
    next_order: u64,
}

impl MemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new order and index its line items immediately.
    pub fn insert(&mut self, status: OrderStatus, lines: Vec<LineItem>) -> OrderId {
        let id = self.insert_unindexed(status, lines);
        self.index_order(id);
        id
    }

    /// Store a new order that the linkage lookup will not return yet.
    pub fn insert_unindexed(&mut self, status: OrderStatus, lines: Vec<LineItem>) -> OrderId {
        self.next_order += 1;
        let id = OrderId::new(self.next_order);
        self.orders.insert(
            id,
            Order {
                id,
                status,
                lines,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Bring the linkage index up to date for every stored order.
    pub fn reindex(&mut self) {
        let ids: Vec<OrderId> = self.orders.keys().copied().collect();
        for id in ids {
            self.index_order(id);
        }
    }

    pub fn notes(&self, id: OrderId) -> &[String] {
        self.notes.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn index_order(&mut self, id: OrderId) {
        let Some(order) = self.orders.get(&id) else {
            return;
        };
        for line in &order.lines {
            if let Some(product_id) = line.product_id {
                self.linkage.insert((product_id, id));
            }
        }
    }
}

impl OrderStore for MemoryOrders {
    fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.get(&id).cloned()
    }

    fn orders(&self, status: Option<&OrderStatus>) -> Vec<Order> {
        let mut rows: Vec<Order> = self
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| &o.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows
    }

    fn order_ids_for_products(
        &self,
        product_ids: &BTreeSet<ProductId>,
        status: Option<&OrderStatus>,
    ) -> Vec<OrderId> {
        let mut ids: BTreeSet<OrderId> = self
            .linkage
            .iter()
            .filter(|(product, _)| product_ids.contains(product))
            .map(|(_, order)| *order)
            .collect();

        if let Some(status) = status {
            ids.retain(|id| {
                self.orders
                    .get(id)
                    .is_some_and(|o| &o.status == status)
            });
        }

        ids.into_iter().rev().collect()
    }

    fn set_status(&mut self, id: OrderId, status: OrderStatus) -> DomainResult<()> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::persistence(format!("unknown order {id}")))?;
        order.status = status;
        Ok(())
    }

    fn add_note(&mut self, id: OrderId, note: String) -> DomainResult<()> {
        if !self.orders.contains_key(&id) {
            return Err(DomainError::persistence(format!("unknown order {id}")));
        }
        self.notes.entry(id).or_default().push(note);
        Ok(())
    }
}
