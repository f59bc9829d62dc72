//! Product listing, saving and bulk edits.

use shopdesk_approvals::{ApprovalStore, create_request};
use shopdesk_audit::{AuditAction, AuditStore, record};
use shopdesk_auth::{AccessPolicy, UserContext};
use shopdesk_catalog::{
    CatalogStore, Product, ProductKind, ProductPayload, ProductSnapshot, ProductStatus,
    StockStatus, apply_payload, snapshot,
};
use shopdesk_core::{
    DomainError, DomainResult, EditableField, OwnershipMode, ProductId, RequestId, Settings,
    UserId,
};
use shopdesk_orders::{OwnershipIndex, accessible_product_ids};

pub const PER_PAGE: usize = 20;

/// Listing filters for the product table.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// 1-based.
    pub page: usize,
    pub search: String,
    pub stock_status: Option<StockStatus>,
    pub product_kind: Option<ProductKind>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            stock_status: None,
            product_kind: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub rows: Vec<Product>,
    pub total: usize,
}

/// Products visible to `user`, newest first.
///
/// Restricted mode narrows the listing to the caller's owned products before
/// any filter runs; a partner who owns nothing gets an empty page, not an
/// error.
pub fn list_products(
    user: &UserContext,
    settings: &Settings,
    catalog: &dyn CatalogStore,
    query: &ProductQuery,
) -> DomainResult<ProductPage> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) {
        return Err(DomainError::PermissionDenied);
    }

    let mut rows: Vec<Product> = catalog.products();

    if policy.is_partner(Some(user)) && settings.ownership_mode == OwnershipMode::Restricted {
        let scope = accessible_product_ids(catalog, user.id);
        rows.retain(|p| scope.contains(&p.id));
    }

    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        rows.retain(|p| {
            p.name.to_lowercase().contains(&needle) || p.sku.to_lowercase().contains(&needle)
        });
    }
    if let Some(stock) = query.stock_status {
        rows.retain(|p| p.stock_status == stock);
    }
    if let Some(kind) = query.product_kind {
        rows.retain(|p| p.kind == kind);
    }

    rows.sort_by(|a, b| b.id.cmp(&a.id));
    let total = rows.len();
    let page = query.page.max(1);
    let rows = rows
        .into_iter()
        .skip((page - 1) * PER_PAGE)
        .take(PER_PAGE)
        .collect();
    Ok(ProductPage { rows, total })
}

/// Admin-only reassignment carried alongside a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    Assign(UserId),
    Clear,
}

#[derive(Debug, Clone, Default)]
pub struct SaveProductInput {
    /// `None` creates a product.
    pub product_id: Option<ProductId>,
    pub payload: ProductPayload,
    pub assignment: Option<AssignmentChange>,
}

/// What happened to a save: applied directly, or parked in the approval
/// queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(ProductId),
    Submitted(RequestId),
}

/// Create or update a product on behalf of `user`.
///
/// Partner input is masked down to the settings' editable fields before it
/// goes anywhere, and a disallowed status choice falls back to draft. When
/// approval is required for this caller the masked payload is queued instead
/// of applied.
pub fn save_product(
    user: &UserContext,
    settings: &Settings,
    catalog: &mut dyn CatalogStore,
    approvals: &mut dyn ApprovalStore,
    audit: &mut dyn AuditStore,
    index: &OwnershipIndex,
    input: SaveProductInput,
) -> DomainResult<SaveOutcome> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) {
        return Err(DomainError::PermissionDenied);
    }

    let existing = input.product_id.and_then(|id| catalog.product(id));
    if let Some(id) = input.product_id {
        // A missing product and a foreign product fail the same way.
        let ownership = existing.as_ref().map(Product::ownership);
        if !policy.can_manage_product(Some(user), ownership.as_ref()) {
            return Err(DomainError::PermissionDenied);
        }
        if user.manage_all && existing.is_none() {
            return Err(DomainError::NotFound);
        }
        debug_assert!(existing.as_ref().is_none_or(|p| p.id == id));
    }

    let payload = if policy.is_partner(Some(user)) {
        mask_payload(settings, input.payload)
    } else {
        input.payload
    };

    let before = match &existing {
        Some(product) => snapshot(product, &catalog.variants(product.id)),
        None => ProductSnapshot::default(),
    };

    if policy.approval_required(Some(user)) {
        let request = create_request(
            approvals,
            audit,
            user.id,
            input.product_id,
            &before,
            &payload,
        )?;
        return Ok(SaveOutcome::Submitted(request));
    }

    let product_id = apply_payload(catalog, input.product_id, &payload, user.id)?;

    // Reassignment is an admin concern; partner input never carries it.
    if user.manage_all
        && let Some(change) = input.assignment
        && let Some(mut product) = catalog.product(product_id)
    {
        product.assigned_to = match change {
            AssignmentChange::Assign(owner) => Some(owner),
            AssignmentChange::Clear => None,
        };
        catalog.save_product(product)?;
    }

    let after = catalog
        .product(product_id)
        .map(|p| snapshot(&p, &catalog.variants(product_id)))
        .unwrap_or_default();
    let action = if input.product_id.is_none() {
        AuditAction::PRODUCT_CREATE
    } else {
        AuditAction::PRODUCT_EDIT
    };
    record(
        audit,
        user.id,
        action,
        product_id.as_u64(),
        "product",
        &before,
        &after,
    )?;

    index.bump();
    tracing::info!(product = %product_id, user = %user.id, "product saved");
    Ok(SaveOutcome::Saved(product_id))
}

/// One bulk edit applied across many products.
#[derive(Debug, Clone, Default)]
pub struct BulkUpdate {
    pub product_ids: Vec<ProductId>,
    pub status: Option<ProductStatus>,
    pub stock_quantity: Option<i64>,
}

/// Apply `update` to every listed product the caller may manage.
///
/// Unmanageable ids are skipped, not fatal; the return value is how many
/// products actually changed. Each field is gated on `editable_fields`
/// independently, so a locked status never blocks an allowed stock update.
/// Products the update leaves as-is are not saved, audited or counted.
/// Stock applied to a variable product propagates to its variants, since the
/// parent does not carry stock itself.
pub fn bulk_update(
    user: &UserContext,
    settings: &Settings,
    catalog: &mut dyn CatalogStore,
    audit: &mut dyn AuditStore,
    index: &OwnershipIndex,
    update: &BulkUpdate,
) -> DomainResult<usize> {
    let policy = AccessPolicy::new(settings);
    if !policy.can_access_dashboard(Some(user)) {
        return Err(DomainError::PermissionDenied);
    }

    let is_partner = policy.is_partner(Some(user));
    let status = update
        .status
        .filter(|_| !is_partner || settings.field_editable(EditableField::Status))
        .map(|s| {
            if is_partner && !ProductStatus::partner_choices().contains(&s) {
                ProductStatus::Draft
            } else {
                s
            }
        });
    let stock = update
        .stock_quantity
        .filter(|_| !is_partner || settings.field_editable(EditableField::StockQuantity));

    let mut touched = 0usize;
    for &id in &update.product_ids {
        let Some(mut product) = catalog.product(id) else {
            continue;
        };
        if !policy.can_manage_product(Some(user), Some(&product.ownership())) {
            continue;
        }

        let before = snapshot(&product, &catalog.variants(id));
        let mut dirty = false;

        if let Some(status) = status
            && product.status != status
        {
            product.status = status;
            dirty = true;
        }
        if let Some(qty) = stock {
            if product.is_variable() {
                for mut variant in catalog.variants(id) {
                    if variant.manage_stock && variant.stock_quantity == qty {
                        continue;
                    }
                    variant.manage_stock = true;
                    variant.stock_quantity = qty;
                    variant.stock_status = StockStatus::from_quantity(qty);
                    catalog.save_variant(variant)?;
                    dirty = true;
                }
            } else if !product.manage_stock || product.stock_quantity != Some(qty) {
                product.manage_stock = true;
                product.stock_quantity = Some(qty);
                product.stock_status = StockStatus::from_quantity(qty);
                dirty = true;
            }
        }

        if !dirty {
            continue;
        }
        catalog.save_product(product)?;

        let after = catalog
            .product(id)
            .map(|p| snapshot(&p, &catalog.variants(id)))
            .unwrap_or_default();
        record(
            audit,
            user.id,
            AuditAction::PRODUCT_BULK_UPDATE,
            id.as_u64(),
            "product",
            &before,
            &after,
        )?;
        touched += 1;
    }

    if touched > 0 {
        index.bump();
    }
    tracing::info!(user = %user.id, touched, "bulk product update");
    Ok(touched)
}

/// Drop payload fields the settings keep partners away from.
fn mask_payload(settings: &Settings, mut payload: ProductPayload) -> ProductPayload {
    if !settings.field_editable(EditableField::Name) {
        payload.name = None;
    }
    if !settings.field_editable(EditableField::Description) {
        payload.description = None;
    }
    if !settings.field_editable(EditableField::Sku) {
        payload.sku = None;
    }
    if !settings.field_editable(EditableField::RegularPrice) {
        payload.regular_price = None;
    }
    if !settings.field_editable(EditableField::SalePrice) {
        payload.sale_price = None;
    }
    if !settings.field_editable(EditableField::StockQuantity) {
        payload.stock_quantity = None;
    }
    if !settings.field_editable(EditableField::Status) {
        payload.status = None;
    } else if let Some(status) = payload.status
        && !ProductStatus::partner_choices().contains(&status)
    {
        payload.status = Some(ProductStatus::Draft);
    }

    for patch in &mut payload.variations {
        if !settings.field_editable(EditableField::Sku) {
            patch.sku = None;
        }
        if !settings.field_editable(EditableField::RegularPrice) {
            patch.regular_price = None;
        }
        if !settings.field_editable(EditableField::SalePrice) {
            patch.sale_price = None;
        }
        if !settings.field_editable(EditableField::StockQuantity) {
            patch.stock_quantity = None;
        }
    }

    payload
}
