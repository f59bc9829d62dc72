//! Ownership scope for orders.
//!
//! In restricted mode a partner only sees orders containing their own
//! products. Resolving that set means walking every line item of every
//! candidate order, so the result is cached per (user, search, status) and
//! invalidated wholesale by bumping a generation counter whenever any
//! product changes hands.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use shopdesk_catalog::CatalogStore;
use shopdesk_core::{OrderId, Ownership, ProductId, UserId};

use crate::order::{Order, OrderStatus};
use crate::store::OrderStore;

/// How many recent orders the reconciliation scan inspects. The linkage
/// index can lag behind freshly written orders; anything older than this
/// window is assumed indexed.
const RECENT_SCAN_LIMIT: usize = 100;

const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Products the user owns: assigned to them, or authored by them and not
/// assigned away.
pub fn accessible_product_ids(catalog: &dyn CatalogStore, user: UserId) -> BTreeSet<ProductId> {
    catalog
        .products()
        .into_iter()
        .filter(|p| p.ownership().owner() == user)
        .map(|p| p.id)
        .collect()
}

/// Ownership of every still-existing product on the order's lines. Lines
/// whose product has been deleted are skipped.
pub fn order_line_ownerships(catalog: &dyn CatalogStore, order: &Order) -> Vec<Ownership> {
    order
        .lines
        .iter()
        .filter_map(|line| line.product_id)
        .filter_map(|id| catalog.product(id))
        .map(|p| p.ownership())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    user: UserId,
    search: String,
    status: Option<OrderStatus>,
}

#[derive(Debug)]
struct CacheEntry {
    generation: u64,
    computed_at: Instant,
    ids: Vec<OrderId>,
}

/// Cached resolver for "which orders can this user see".
///
/// The generation counter is bumped by any write that can change order
/// visibility (product save, assignment change, order status update). Entries
/// also expire after a short TTL so the reconciliation scan re-runs even on a
/// quiet system.
#[derive(Debug)]
pub struct OwnershipIndex {
    generation: AtomicU64,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl Default for OwnershipIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipIndex {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Invalidate every cached scope.
    pub fn bump(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, "ownership index invalidated");
    }

    /// Order ids visible to `user` in restricted mode, newest first.
    ///
    /// `product_ids` is the user's owned-product set; an empty set short
    /// circuits to no orders. The linkage index supplies the bulk of the
    /// result and a bounded scan over the most recent orders fills in rows
    /// the index has not caught up with yet.
    pub fn accessible_order_ids(
        &self,
        orders: &dyn OrderStore,
        user: UserId,
        product_ids: &BTreeSet<ProductId>,
        search: &str,
        status: Option<&OrderStatus>,
    ) -> Vec<OrderId> {
        if product_ids.is_empty() {
            return Vec::new();
        }

        let key = CacheKey {
            user,
            search: search.to_owned(),
            status: status.cloned(),
        };
        let generation = self.generation.load(Ordering::SeqCst);

        if let Ok(entries) = self.entries.lock()
            && let Some(entry) = entries.get(&key)
            && entry.generation == generation
            && entry.computed_at.elapsed() < self.ttl
        {
            return entry.ids.clone();
        }

        let ids = Self::resolve(orders, product_ids, search, status);

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CacheEntry {
                    generation,
                    computed_at: Instant::now(),
                    ids: ids.clone(),
                },
            );
        }
        ids
    }

    fn resolve(
        orders: &dyn OrderStore,
        product_ids: &BTreeSet<ProductId>,
        search: &str,
        status: Option<&OrderStatus>,
    ) -> Vec<OrderId> {
        let mut ids: BTreeSet<OrderId> = orders
            .order_ids_for_products(product_ids, status)
            .into_iter()
            .collect();

        // Catch orders the linkage index hasn't picked up yet.
        for order in orders.orders(status).into_iter().take(RECENT_SCAN_LIMIT) {
            if order
                .lines
                .iter()
                .filter_map(|line| line.product_id)
                .any(|id| product_ids.contains(&id))
            {
                ids.insert(order.id);
            }
        }

        let digits: String = search.chars().filter(|c| c.is_ascii_digit()).collect();
        let mut ids: Vec<OrderId> = ids
            .into_iter()
            .filter(|id| digits.is_empty() || id.as_u64().to_string().contains(&digits))
            .collect();
        ids.sort_by(|a, b| b.cmp(a));
        ids
    }
}
