//! Attribute blueprint -> variant generation.
//!
//! A blueprint is an ordered list of attribute rows, each naming the
//! attribute and its allowed values. Applying a blueprint replaces the
//! product's variation attributes and creates one variant per attribute-value
//! combination that does not already exist. Pre-existing variants are never
//! touched, so repeated application is idempotent and manual edits survive.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use shopdesk_core::{DomainResult, ProductId};

use crate::product::ProductAttribute;
use crate::store::CatalogStore;
use crate::variant::{Variant, combination_key};

/// One attribute row of a blueprint as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintRow {
    pub name: String,
    pub values: Vec<String>,
}

impl BlueprintRow {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reduce a value to its canonical slug form: lowercase, alphanumeric runs
/// joined by single hyphens.
pub fn slugify(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Canonicalize submitted rows.
///
/// Rows with an empty name or no submitted values are dropped; values are
/// slugified and deduplicated preserving first occurrence. A row that had
/// values but lost all of them to normalization is kept with an empty value
/// set so that [`apply_blueprint`] can refuse the whole blueprint.
pub fn normalize_blueprint(rows: &[BlueprintRow]) -> Vec<BlueprintRow> {
    rows.iter()
        .filter_map(|row| {
            let name = slugify(&row.name);
            if name.is_empty() || row.values.is_empty() {
                return None;
            }

            let mut seen = BTreeSet::new();
            let mut values = Vec::new();
            for value in &row.values {
                let slug = slugify(value);
                if slug.is_empty() {
                    continue;
                }
                if seen.insert(slug.clone()) {
                    values.push(slug);
                }
            }

            Some(BlueprintRow { name, values })
        })
        .collect()
}

/// Cartesian product across the rows' value sets, in row order.
pub fn combinations(rows: &[BlueprintRow]) -> Vec<BTreeMap<String, String>> {
    let mut combos: Vec<BTreeMap<String, String>> = vec![BTreeMap::new()];
    for row in rows {
        let mut next = Vec::with_capacity(combos.len() * row.values.len().max(1));
        for base in &combos {
            for value in &row.values {
                let mut combo = base.clone();
                combo.insert(row.name.clone(), value.clone());
                next.push(combo);
            }
        }
        combos = next;
    }
    combos
}

/// Apply `rows` to the variable product `product_id`.
///
/// Persists the product's new attribute set first (an attribute must exist
/// before a variant can reference it), then creates the missing combinations.
/// Returns the number of variants created. A blueprint that normalizes to
/// nothing, a row whose value set normalizes to empty, a missing product or
/// a non-variable product are all treated as "no blueprint supplied".
pub fn apply_blueprint(
    store: &mut dyn CatalogStore,
    product_id: ProductId,
    rows: &[BlueprintRow],
) -> DomainResult<usize> {
    let rows = normalize_blueprint(rows);
    if rows.is_empty() || rows.iter().any(|r| r.values.is_empty()) {
        return Ok(0);
    }

    let Some(mut product) = store.product(product_id) else {
        return Ok(0);
    };
    if !product.is_variable() {
        return Ok(0);
    }

    product.attributes = rows
        .iter()
        .enumerate()
        .map(|(position, row)| ProductAttribute {
            name: row.name.clone(),
            options: row.values.clone(),
            position,
            visible: true,
            used_for_variations: true,
        })
        .collect();
    let product_id = store.save_product(product)?;

    let mut existing: BTreeSet<String> = store
        .variants(product_id)
        .iter()
        .map(Variant::combination_key)
        .collect();

    let mut created = 0usize;
    for combination in combinations(&rows) {
        if !existing.insert(combination_key(&combination)) {
            continue;
        }
        store.save_variant(Variant::for_combination(product_id, combination))?;
        created += 1;
    }

    if created > 0 {
        tracing::debug!(product = %product_id, created, "generated variants from blueprint");
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::UserId;

    use crate::memory::MemoryCatalog;
    use crate::product::{Product, ProductKind, StockStatus};

    fn variable_product(store: &mut MemoryCatalog) -> ProductId {
        let mut product = Product::new(UserId::new(1));
        product.kind = ProductKind::Variable;
        product.name = "Shirt".to_string();
        store.save_product(product).unwrap()
    }

    fn size_color() -> Vec<BlueprintRow> {
        vec![
            BlueprintRow::new("Size", ["s", "m", "l"]),
            BlueprintRow::new("Color", ["red", "blue"]),
        ]
    }

    #[test]
    fn slugify_canonicalizes() {
        assert_eq!(slugify("  Dark Blue "), "dark-blue");
        assert_eq!(slugify("XL"), "xl");
        assert_eq!(slugify("--"), "");
        assert_eq!(slugify("a//b"), "a-b");
    }

    #[test]
    fn normalization_drops_and_dedupes() {
        let rows = vec![
            BlueprintRow::new("", ["x"]),
            BlueprintRow::new("Size", ["S", "s", " M "]),
            BlueprintRow::new("Empty", Vec::<String>::new()),
        ];
        let normalized = normalize_blueprint(&rows);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].name, "size");
        assert_eq!(normalized[0].values, vec!["s", "m"]);
    }

    #[test]
    fn combinations_follow_row_order() {
        let rows = normalize_blueprint(&size_color());
        let combos = combinations(&rows);
        assert_eq!(combos.len(), 6);
        // First row varies slowest.
        assert_eq!(combos[0]["size"], "s");
        assert_eq!(combos[0]["color"], "red");
        assert_eq!(combos[1]["color"], "blue");
    }

    // A 3x2 blueprint on an empty variable product.
    #[test]
    fn generates_full_combination_space() {
        let mut store = MemoryCatalog::new();
        let id = variable_product(&mut store);

        let created = apply_blueprint(&mut store, id, &size_color()).unwrap();
        assert_eq!(created, 6);

        let variants = store.variants(id);
        assert_eq!(variants.len(), 6);
        for v in &variants {
            assert_eq!(v.stock_quantity, 0);
            assert_eq!(v.stock_status, StockStatus::OutOfStock);
            assert!(v.enabled);
            assert!(v.manage_stock);
        }

        let product = store.product(id).unwrap();
        assert_eq!(product.attributes.len(), 2);
        assert_eq!(product.attributes[0].name, "size");
        assert_eq!(product.attributes[0].position, 0);
        assert_eq!(product.attributes[1].name, "color");
    }

    // Reapplication creates nothing and leaves manual edits alone.
    #[test]
    fn reapplication_is_idempotent_and_preserves_edits() {
        let mut store = MemoryCatalog::new();
        let id = variable_product(&mut store);
        apply_blueprint(&mut store, id, &size_color()).unwrap();

        let mut edited = store.variants(id).into_iter().next().unwrap();
        edited.sku = "MANUAL-1".to_string();
        edited.regular_price = "15.00".to_string();
        edited.stock_quantity = 9;
        let edited_id = store.save_variant(edited).unwrap();

        let created = apply_blueprint(&mut store, id, &size_color()).unwrap();
        assert_eq!(created, 0);
        assert_eq!(store.variants(id).len(), 6);

        let survivor = store.variant(edited_id).unwrap();
        assert_eq!(survivor.sku, "MANUAL-1");
        assert_eq!(survivor.regular_price, "15.00");
        assert_eq!(survivor.stock_quantity, 9);
    }

    #[test]
    fn extending_a_row_only_adds_missing_combinations() {
        let mut store = MemoryCatalog::new();
        let id = variable_product(&mut store);
        apply_blueprint(&mut store, id, &size_color()).unwrap();

        let extended = vec![
            BlueprintRow::new("Size", ["s", "m", "l", "xl"]),
            BlueprintRow::new("Color", ["red", "blue"]),
        ];
        let created = apply_blueprint(&mut store, id, &extended).unwrap();
        assert_eq!(created, 2);
        assert_eq!(store.variants(id).len(), 8);
    }

    #[test]
    fn row_losing_all_values_aborts_before_any_write() {
        let mut store = MemoryCatalog::new();
        let id = variable_product(&mut store);

        let rows = vec![
            BlueprintRow::new("Size", ["s"]),
            BlueprintRow::new("Color", ["??", "--"]),
        ];
        let created = apply_blueprint(&mut store, id, &rows).unwrap();
        assert_eq!(created, 0);
        assert!(store.variants(id).is_empty());
        assert!(store.product(id).unwrap().attributes.is_empty());
    }

    #[test]
    fn simple_product_is_left_alone() {
        let mut store = MemoryCatalog::new();
        let id = store.save_product(Product::new(UserId::new(1))).unwrap();
        let created = apply_blueprint(&mut store, id, &size_color()).unwrap();
        assert_eq!(created, 0);
        assert!(store.variants(id).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn row_strategy() -> impl Strategy<Value = BlueprintRow> {
            (
                "[a-z]{1,8}",
                prop::collection::vec("[a-z0-9]{1,6}", 1..4),
            )
                .prop_map(|(name, values)| BlueprintRow { name, values })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: variant count equals the product of each row's
            /// unique value count, and reapplying creates nothing.
            #[test]
            fn covers_space_exactly_once(
                rows in prop::collection::vec(row_strategy(), 1..4)
            ) {
                // Distinct attribute names; duplicate names would overwrite
                // each other inside a combination map.
                let mut rows = rows;
                for (i, row) in rows.iter_mut().enumerate() {
                    row.name = format!("{}{}", row.name, i);
                }

                let normalized = normalize_blueprint(&rows);
                let expected: usize = normalized.iter().map(|r| r.values.len()).product();

                let mut store = MemoryCatalog::new();
                let id = variable_product(&mut store);

                let created = apply_blueprint(&mut store, id, &rows).unwrap();
                prop_assert_eq!(created, expected);
                prop_assert_eq!(store.variants(id).len(), expected);

                let again = apply_blueprint(&mut store, id, &rows).unwrap();
                prop_assert_eq!(again, 0);
                prop_assert_eq!(store.variants(id).len(), expected);
            }
        }
    }
}
