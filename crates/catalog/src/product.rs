//! Catalog item (product) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{Ownership, ProductId, UserId};

/// Product lifecycle status.
///
/// Unknown stored values collapse to `Draft`: the policy for non-destructive
/// fields is best safe default over hard failure.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Pending,
    Private,
}

impl ProductStatus {
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim() {
            "publish" | "published" => Self::Published,
            "pending" => Self::Pending,
            "private" => Self::Private,
            _ => Self::Draft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "publish",
            Self::Pending => "pending",
            Self::Private => "private",
        }
    }

    /// Statuses a partner may pick in the dashboard form. `Private` is
    /// reserved for the backend.
    pub fn partner_choices() -> [ProductStatus; 3] {
        [Self::Draft, Self::Published, Self::Pending]
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&raw))
    }
}

/// Simple vs. variable product. Unknown values collapse to `Simple`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ProductKind {
    #[default]
    Simple,
    Variable,
}

impl ProductKind {
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim() {
            "variable" => Self::Variable,
            _ => Self::Simple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Variable => "variable",
        }
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&raw))
    }
}

/// Stock availability flag.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[default]
    #[serde(rename = "instock")]
    InStock,
    #[serde(rename = "outofstock")]
    OutOfStock,
}

impl StockStatus {
    /// Derived flag for managed stock: anything above zero is in stock.
    pub fn from_quantity(qty: i64) -> Self {
        if qty > 0 { Self::InStock } else { Self::OutOfStock }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
        }
    }
}

/// One variation-enabled attribute on a variable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub name: String,
    pub options: Vec<String>,
    pub position: usize,
    pub visible: bool,
    pub used_for_variations: bool,
}

/// Catalog item as stored by the platform.
///
/// Prices are carried as normalized decimal strings (empty = unset), which is
/// the platform's wire format and what the approval diff compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub kind: ProductKind,
    pub status: ProductStatus,
    pub regular_price: String,
    pub sale_price: String,
    pub manage_stock: bool,
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    pub image_id: Option<u64>,
    pub author: UserId,
    pub assigned_to: Option<UserId>,
    pub attributes: Vec<ProductAttribute>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// A blank unsaved product authored by `author`.
    pub fn new(author: UserId) -> Self {
        Self {
            id: ProductId::default(),
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            kind: ProductKind::Simple,
            status: ProductStatus::Draft,
            regular_price: String::new(),
            sale_price: String::new(),
            manage_stock: false,
            stock_quantity: None,
            stock_status: StockStatus::InStock,
            image_id: None,
            author,
            assigned_to: None,
            attributes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn ownership(&self) -> Ownership {
        Ownership::new(self.assigned_to, self.author)
    }

    pub fn is_variable(&self) -> bool {
        self.kind == ProductKind::Variable
    }
}

/// Normalize a user-supplied decimal amount to the platform's price format.
///
/// Whitespace and thousands separators are stripped; anything that is not a
/// plain decimal number yields the empty string ("no price").
pub fn normalize_decimal(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    let body = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    let mut dots = 0usize;
    let valid = !body.is_empty()
        && body.chars().all(|c| {
            if c == '.' {
                dots += 1;
                true
            } else {
                c.is_ascii_digit()
            }
        })
        && dots <= 1
        && body != ".";

    if valid { cleaned } else { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_coerces_to_draft() {
        assert_eq!(ProductStatus::from_str_lossy("trash"), ProductStatus::Draft);
        assert_eq!(
            ProductStatus::from_str_lossy("publish"),
            ProductStatus::Published
        );
    }

    #[test]
    fn unknown_kind_coerces_to_simple() {
        assert_eq!(ProductKind::from_str_lossy("grouped"), ProductKind::Simple);
        assert_eq!(ProductKind::from_str_lossy("variable"), ProductKind::Variable);
    }

    #[test]
    fn stock_status_from_quantity() {
        assert_eq!(StockStatus::from_quantity(3), StockStatus::InStock);
        assert_eq!(StockStatus::from_quantity(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_quantity(-1), StockStatus::OutOfStock);
    }

    #[test]
    fn decimal_normalization() {
        assert_eq!(normalize_decimal(" 1,299.50 "), "1299.50");
        assert_eq!(normalize_decimal("19.99"), "19.99");
        assert_eq!(normalize_decimal(""), "");
        assert_eq!(normalize_decimal("free"), "");
        assert_eq!(normalize_decimal("1.2.3"), "");
        assert_eq!(normalize_decimal("-5"), "-5");
    }

    #[test]
    fn status_serde_is_lossy_on_decode() {
        let s: ProductStatus = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(s, ProductStatus::Draft);
        assert_eq!(serde_json::to_string(&ProductStatus::Published).unwrap(), "\"publish\"");
    }
}
