//! Typed mutation payload and audit snapshot.
//!
//! These are the two JSON shapes the approval queue persists: the proposed
//! payload and the before-snapshot. Decoding is deliberately tolerant —
//! absent fields default, unknown enum values collapse to their safe default
//! — because stored blobs outlive code changes.

use serde::{Deserialize, Serialize};

use shopdesk_core::{ProductId, VariantId};

use crate::blueprint::BlueprintRow;
use crate::product::{Product, ProductKind, ProductStatus};
use crate::variant::Variant;

/// Proposed product mutation.
///
/// `None` means "leave the field unchanged"; the dashboard masks out fields
/// the settings do not allow a partner to edit before the payload is applied
/// or queued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    /// Target product; `None` proposes a new product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// `None` keeps the stored kind; new products default to simple.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<VariantPatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variation_blueprint: Vec<BlueprintRow>,
}

/// Proposed update to one existing variant, matched by id + parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantPatch {
    pub id: VariantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Point-in-time capture of a product for audit rows and approval diffs.
///
/// Field names line up with [`ProductPayload`] so the field-level diff can
/// compare the two shapes key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub product_type: ProductKind,
    pub sku: String,
    pub regular_price: String,
    pub sale_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<VariantSnapshot>,
}

/// Variant row inside a [`ProductSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantSnapshot {
    pub id: VariantId,
    pub sku: String,
    pub regular_price: String,
    pub sale_price: String,
    pub stock_quantity: i64,
    pub enabled: bool,
}

/// Capture `product` (and its variant children) for logging/diffing.
pub fn snapshot(product: &Product, variants: &[Variant]) -> ProductSnapshot {
    let variations = if product.is_variable() {
        variants
            .iter()
            .map(|v| VariantSnapshot {
                id: v.id,
                sku: v.sku.clone(),
                regular_price: v.regular_price.clone(),
                sale_price: v.sale_price.clone(),
                stock_quantity: v.stock_quantity,
                enabled: v.enabled,
            })
            .collect()
    } else {
        Vec::new()
    };

    ProductSnapshot {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        product_type: product.kind,
        sku: product.sku.clone(),
        regular_price: product.regular_price.clone(),
        sale_price: product.sale_price.clone(),
        stock_quantity: product.stock_quantity,
        status: product.status,
        image_id: product.image_id,
        variations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_decodes_with_defaults() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"name":"Mug","status":"publish"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Mug"));
        assert_eq!(payload.status, Some(ProductStatus::Published));
        assert_eq!(payload.product_type, None);
        assert!(payload.product_id.is_none());
        assert!(payload.variations.is_empty());
    }

    #[test]
    fn payload_tolerates_unknown_enum_values() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"status":"bogus","product_type":"grouped"}"#).unwrap();
        assert_eq!(payload.status, Some(ProductStatus::Draft));
        assert_eq!(payload.product_type, Some(ProductKind::Simple));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let json = serde_json::to_string(&ProductPayload::default()).unwrap();
        assert!(!json.contains("variation_blueprint"));
        assert!(!json.contains("\"name\""));
        assert!(!json.contains("product_type"));
    }

    #[test]
    fn snapshot_skips_variants_for_simple_products() {
        let product = Product::new(shopdesk_core::UserId::new(1));
        let snap = snapshot(&product, &[]);
        assert!(snap.variations.is_empty());
        assert_eq!(snap.product_type, ProductKind::Simple);
    }
}
