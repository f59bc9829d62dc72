//! `shopdesk-catalog` — product/variant model and catalog mutations.
//!
//! Owns the product and variant shapes, the typed mutation payload, the
//! attribute-blueprint variation generator and the payload application used
//! by both the direct save path and the approval workflow. Storage is behind
//! [`store::CatalogStore`]; an in-memory reference implementation lives in
//! [`memory`].

pub mod blueprint;
pub mod memory;
pub mod payload;
pub mod product;
pub mod service;
pub mod store;
pub mod variant;

pub use blueprint::{BlueprintRow, apply_blueprint, combinations, normalize_blueprint, slugify};
pub use memory::MemoryCatalog;
pub use payload::{ProductPayload, ProductSnapshot, VariantPatch, VariantSnapshot, snapshot};
pub use product::{
    Product, ProductAttribute, ProductKind, ProductStatus, StockStatus, normalize_decimal,
};
pub use service::apply_payload;
pub use store::CatalogStore;
pub use variant::{Variant, combination_key};
