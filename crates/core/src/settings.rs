//! Per-request dashboard settings.
//!
//! The surrounding platform loads these once at the request boundary and
//! passes them explicitly into every policy/service call. The core never
//! reads configuration ambiently.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Visibility scope for partner users.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OwnershipMode {
    /// Every partner sees and manages the whole catalog.
    #[default]
    Shared,
    /// Partners see only items assigned to them (or authored, when unassigned).
    Restricted,
}

impl Serialize for OwnershipMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OwnershipMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unrecognized stored values degrade to shared rather than failing
        // the whole settings record.
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&raw))
    }
}

impl OwnershipMode {
    /// Parse a stored mode, collapsing unknown values to the safe default.
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim() {
            "restricted" => Self::Restricted,
            _ => Self::Shared,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Restricted => "restricted",
        }
    }
}

/// Product fields a partner may edit from the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    Name,
    Sku,
    RegularPrice,
    SalePrice,
    StockQuantity,
    Status,
    Description,
}

impl EditableField {
    pub const ALL: [EditableField; 7] = [
        EditableField::Name,
        EditableField::Sku,
        EditableField::RegularPrice,
        EditableField::SalePrice,
        EditableField::StockQuantity,
        EditableField::Status,
        EditableField::Description,
    ];
}

/// Dashboard configuration as stored by the platform's options table.
///
/// Missing keys deserialize to the shipped defaults, so a fresh install with
/// an empty options record behaves sensibly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enabled: bool,
    pub allowed_roles: BTreeSet<String>,
    pub whitelisted_users: BTreeSet<UserId>,
    /// Whether partners are kept out of the backend admin area. UI concern;
    /// carried here so the settings record round-trips unchanged.
    pub block_admin_area: bool,
    pub editable_fields: BTreeSet<EditableField>,
    pub allow_order_status_update: bool,
    pub ownership_mode: OwnershipMode,
    pub require_product_approval: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_roles: BTreeSet::from(["shop_manager".to_string()]),
            whitelisted_users: BTreeSet::new(),
            block_admin_area: true,
            editable_fields: EditableField::ALL.into_iter().collect(),
            allow_order_status_update: true,
            ownership_mode: OwnershipMode::Shared,
            require_product_approval: false,
        }
    }
}

impl Settings {
    pub fn field_editable(&self, field: EditableField) -> bool {
        self.editable_fields.contains(&field)
    }

    pub fn is_whitelisted(&self, user: UserId) -> bool {
        self.whitelisted_users.contains(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_configuration() {
        let s = Settings::default();
        assert!(s.enabled);
        assert!(s.allowed_roles.contains("shop_manager"));
        assert!(s.whitelisted_users.is_empty());
        assert_eq!(s.ownership_mode, OwnershipMode::Shared);
        assert!(!s.require_product_approval);
        assert_eq!(s.editable_fields.len(), 7);
    }

    #[test]
    fn unknown_ownership_mode_collapses_to_shared() {
        assert_eq!(OwnershipMode::from_str_lossy("both"), OwnershipMode::Shared);
        assert_eq!(
            OwnershipMode::from_str_lossy("restricted"),
            OwnershipMode::Restricted
        );
    }

    #[test]
    fn partial_settings_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"ownership_mode":"restricted"}"#).unwrap();
        assert_eq!(s.ownership_mode, OwnershipMode::Restricted);
        assert!(s.enabled);
        assert!(s.allow_order_status_update);
    }
}
