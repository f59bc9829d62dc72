//! `shopdesk-dashboard` — request-scoped dashboard services.
//!
//! This is where the pieces meet: every operation takes the caller's
//! [`shopdesk_auth::UserContext`] and the current [`shopdesk_core::Settings`],
//! runs the policy gates, masks input down to what the caller may touch, and
//! then drives the catalog/order stores, the approval queue and the audit
//! trail.

pub mod orders;
pub mod products;
pub mod reviews;

pub use orders::{OrderPage, OrderQuery, list_orders, update_order_status};
pub use reviews::decide_request;
pub use products::{
    AssignmentChange, BulkUpdate, ProductPage, ProductQuery, SaveOutcome, SaveProductInput,
    bulk_update, list_products, save_product,
};
