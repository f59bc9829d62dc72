//! `shopdesk-orders` — order model and the ownership index.
//!
//! Order visibility is derivative: an order belongs to whoever owns at least
//! one of its line items' products. The [`index`] module computes that scope
//! for restricted mode and caches the expensive order lookup behind a
//! generation counter.

pub mod index;
pub mod memory;
pub mod order;
pub mod store;

pub use index::{OwnershipIndex, accessible_product_ids, order_line_ownerships};
pub use memory::MemoryOrders;
pub use order::{LineItem, Order, OrderStatus};
pub use store::OrderStore;
