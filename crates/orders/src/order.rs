//! Order model.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{OrderId, ProductId};

/// Order status slug.
///
/// The platform owns the status vocabulary (and plugins extend it), so this
/// stays an opaque string; the valid set for a given request is passed in by
/// the caller when a transition has to be validated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(Cow<'static, str>);

impl OrderStatus {
    pub fn new(slug: impl Into<Cow<'static, str>>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchased line. A line whose product was deleted keeps `product_id`
/// as `None` and contributes nothing to ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Option<ProductId>,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
        }
    }
}

/// Order as stored by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub lines: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}
