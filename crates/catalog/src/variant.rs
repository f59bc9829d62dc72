//! Variant child of a variable product.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopdesk_core::{ProductId, VariantId};

use crate::product::StockStatus;

/// One concrete attribute-value combination of a variable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub parent: ProductId,
    pub sku: String,
    pub regular_price: String,
    pub sale_price: String,
    pub manage_stock: bool,
    pub stock_quantity: i64,
    pub stock_status: StockStatus,
    /// Disabled variants stay stored but are hidden from the storefront.
    pub enabled: bool,
    /// Attribute slug -> value slug. A `BTreeMap` so that equality and the
    /// combination key are independent of insertion order.
    pub attributes: BTreeMap<String, String>,
}

impl Variant {
    /// A fresh variant for `combination`, with the generator defaults:
    /// managed stock at zero, out of stock, enabled.
    pub fn for_combination(parent: ProductId, combination: BTreeMap<String, String>) -> Self {
        Self {
            id: VariantId::default(),
            parent,
            sku: String::new(),
            regular_price: String::new(),
            sale_price: String::new(),
            manage_stock: true,
            stock_quantity: 0,
            stock_status: StockStatus::OutOfStock,
            enabled: true,
            attributes: combination,
        }
    }

    /// Canonical key of this variant's attribute assignment.
    pub fn combination_key(&self) -> String {
        combination_key(&self.attributes)
    }
}

/// Canonical serialization of an attribute-value combination.
///
/// Two combinations with the same pairs produce the same key regardless of
/// how the maps were built.
pub fn combination_key(combination: &BTreeMap<String, String>) -> String {
    serde_json::to_string(combination).unwrap_or_default()
}
