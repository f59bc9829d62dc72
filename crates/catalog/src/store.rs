//! Catalog storage boundary.

use shopdesk_core::{DomainResult, ProductId, VariantId};

use crate::product::Product;
use crate::variant::Variant;

/// Persistence port for catalog items and their variants.
///
/// Individual saves are atomic at the storage layer; there is no transaction
/// spanning multiple calls, so multi-step operations are best-effort (a
/// failure mid-way leaves earlier writes in place).
pub trait CatalogStore {
    fn product(&self, id: ProductId) -> Option<Product>;

    /// Every stored product, in no particular order.
    fn products(&self) -> Vec<Product>;

    /// Insert (`id` zero/default) or update. Returns the persisted id.
    fn save_product(&mut self, product: Product) -> DomainResult<ProductId>;

    fn variant(&self, id: VariantId) -> Option<Variant>;

    /// Variant children of `parent`, in creation order.
    fn variants(&self, parent: ProductId) -> Vec<Variant>;

    /// Insert (`id` zero/default) or update. Returns the persisted id.
    fn save_variant(&mut self, variant: Variant) -> DomainResult<VariantId>;
}
