//! In-memory catalog store.

use std::collections::BTreeMap;

use shopdesk_core::{DomainError, DomainResult, ProductId, VariantId};

use crate::product::Product;
use crate::store::CatalogStore;
use crate::variant::Variant;

/// In-memory [`CatalogStore`].
///
/// Reference implementation for tests/dev. Ids are allocated from a
/// monotonically increasing counter, matching the platform's auto-increment
/// behavior.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: BTreeMap<ProductId, Product>,
    variants: BTreeMap<VariantId, Variant>,
    next_product: u64,
    next_variant: u64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryCatalog {
    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    fn save_product(&mut self, mut product: Product) -> DomainResult<ProductId> {
        if product.id == ProductId::default() {
            self.next_product += 1;
            product.id = ProductId::new(self.next_product);
        } else if !self.products.contains_key(&product.id) {
            return Err(DomainError::persistence(format!(
                "update of unknown product {}",
                product.id
            )));
        }

        let id = product.id;
        self.products.insert(id, product);
        Ok(id)
    }

    fn variant(&self, id: VariantId) -> Option<Variant> {
        self.variants.get(&id).cloned()
    }

    fn variants(&self, parent: ProductId) -> Vec<Variant> {
        self.variants
            .values()
            .filter(|v| v.parent == parent)
            .cloned()
            .collect()
    }

    fn save_variant(&mut self, mut variant: Variant) -> DomainResult<VariantId> {
        if variant.parent == ProductId::default() || !self.products.contains_key(&variant.parent) {
            return Err(DomainError::persistence(format!(
                "variant parent {} does not exist",
                variant.parent
            )));
        }

        if variant.id == VariantId::default() {
            self.next_variant += 1;
            variant.id = VariantId::new(self.next_variant);
        } else if !self.variants.contains_key(&variant.id) {
            return Err(DomainError::persistence(format!(
                "update of unknown variant {}",
                variant.id
            )));
        }

        let id = variant.id;
        self.variants.insert(id, variant);
        Ok(id)
    }
}
