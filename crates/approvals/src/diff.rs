//! Field-level diff between a before-snapshot and a proposed payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields surfaced on the review screen. Keys match the serialized names of
/// both `ProductSnapshot` and `ProductPayload`.
pub const TRACKED_FIELDS: [&str; 9] = [
    "name",
    "description",
    "sku",
    "regular_price",
    "sale_price",
    "stock_quantity",
    "status",
    "product_type",
    "variation_blueprint",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

/// Compare `before` and `proposed` (both JSON objects) over the tracked
/// fields. A field missing from `proposed` means "unchanged" and is never
/// reported; present fields are compared by their string cast so `12` and
/// `"12"` do not show up as a change.
pub fn build_diff(before: &Value, proposed: &Value) -> BTreeMap<String, FieldChange> {
    let mut diff = BTreeMap::new();
    for field in TRACKED_FIELDS {
        let Some(to) = proposed.get(field) else {
            continue;
        };
        if to.is_null() {
            continue;
        }
        let from = before.get(field).cloned().unwrap_or(Value::Null);
        if cast_str(&from) != cast_str(to) {
            diff.insert(
                field.to_owned(),
                FieldChange {
                    from,
                    to: to.clone(),
                },
            );
        }
    }
    diff
}

/// String cast used for comparison: null is empty, booleans render as "1"/"",
/// numbers and strings as themselves, composites as compact JSON.
fn cast_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        composite => serde_json::to_string(composite).unwrap_or_default(),
    }
}
