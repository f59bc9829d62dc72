//! Payload application.

use shopdesk_core::{DomainError, DomainResult, ProductId, UserId};

use crate::blueprint::apply_blueprint;
use crate::payload::ProductPayload;
use crate::product::{Product, ProductKind, StockStatus, normalize_decimal};
use crate::store::CatalogStore;

/// Apply a [`ProductPayload`] to `target`, creating the product when `target`
/// is `None`.
///
/// Used by both the direct save path and the approval workflow's
/// apply-on-approve. Field semantics:
/// - `None` payload fields leave the stored value unchanged, the product
///   kind included: a price edit that does not restate the kind must never
///   flip a variable product back to simple;
/// - pricing and stock are only meaningful for simple products and are
///   cleared on variable products (variants carry them instead);
/// - variant patches are matched by id and must belong to the target product,
///   a mismatched parent is skipped rather than cross-applied;
/// - a non-empty blueprint runs the variation generator last.
pub fn apply_payload(
    store: &mut dyn CatalogStore,
    target: Option<ProductId>,
    payload: &ProductPayload,
    requester: UserId,
) -> DomainResult<ProductId> {
    let mut product = match target {
        Some(id) => store.product(id).ok_or(DomainError::NotFound)?,
        None => Product::new(requester),
    };

    if let Some(name) = &payload.name {
        product.name = name.trim().to_string();
    }
    if let Some(description) = &payload.description {
        product.description = description.clone();
    }
    if let Some(status) = payload.status {
        product.status = status;
    }
    if let Some(sku) = &payload.sku {
        product.sku = sku.trim().to_string();
    }
    if let Some(kind) = payload.product_type {
        product.kind = kind;
    }

    match product.kind {
        ProductKind::Simple => {
            if let Some(price) = &payload.regular_price {
                product.regular_price = normalize_decimal(price);
            }
            if let Some(price) = &payload.sale_price {
                product.sale_price = normalize_decimal(price);
            }
            if let Some(qty) = payload.stock_quantity {
                product.manage_stock = true;
                product.stock_quantity = Some(qty);
                product.stock_status = StockStatus::from_quantity(qty);
            }
        }
        ProductKind::Variable => {
            // Parent-level pricing/stock is meaningless for variable products.
            product.regular_price.clear();
            product.sale_price.clear();
            product.manage_stock = false;
            product.stock_quantity = None;
            product.stock_status = StockStatus::InStock;
        }
    }

    let is_variable = product.kind == ProductKind::Variable;
    let product_id = store.save_product(product)?;

    if is_variable {
        for patch in &payload.variations {
            let Some(mut variant) = store.variant(patch.id) else {
                continue;
            };
            if variant.parent != product_id {
                continue;
            }

            if let Some(sku) = &patch.sku {
                variant.sku = sku.trim().to_string();
            }
            if let Some(price) = &patch.regular_price {
                variant.regular_price = normalize_decimal(price);
            }
            if let Some(price) = &patch.sale_price {
                variant.sale_price = normalize_decimal(price);
            }
            if let Some(qty) = patch.stock_quantity {
                variant.manage_stock = true;
                variant.stock_quantity = qty;
                variant.stock_status = StockStatus::from_quantity(qty);
            }
            if let Some(enabled) = patch.enabled {
                variant.enabled = enabled;
            }

            store.save_variant(variant)?;
        }

        if !payload.variation_blueprint.is_empty() {
            apply_blueprint(store, product_id, &payload.variation_blueprint)?;
        }
    }

    tracing::debug!(product = %product_id, new = target.is_none(), "applied product payload");
    Ok(product_id)
}
