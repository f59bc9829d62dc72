//! In-memory audit store.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Utc;

use shopdesk_core::{AuditEntryId, DomainResult};

use crate::entry::{AuditAction, AuditEntry, NewAuditEntry};
use crate::query::{AuditPage, AuditQuery, SortColumn, SortOrder};
use crate::store::AuditStore;

/// In-memory [`AuditStore`]. Entries live in insertion order; queries copy
/// and sort.
#[derive(Debug, Default)]
pub struct MemoryAudit {
    entries: Vec<AuditEntry>,
    next_id: u64,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(entry: &AuditEntry, query: &AuditQuery) -> bool {
        let f = &query.filters;
        if let Some(action) = &f.action
            && entry.action.as_str() != action
        {
            return false;
        }
        if let Some(user) = f.user_id
            && entry.user_id != user
        {
            return false;
        }
        if let Some(from) = f.date_from
            && entry.created_at.date_naive() < from
        {
            return false;
        }
        if let Some(to) = f.date_to
            && entry.created_at.date_naive() > to
        {
            return false;
        }
        if !f.search.is_empty() {
            let needle = f.search.to_lowercase();
            let hit = entry.action.as_str().to_lowercase().contains(&needle)
                || entry.object_type.to_lowercase().contains(&needle)
                || entry.object_id.to_string().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    fn compare(a: &AuditEntry, b: &AuditEntry, column: SortColumn) -> Ordering {
        let primary = match column {
            SortColumn::Date => a.created_at.cmp(&b.created_at),
            SortColumn::User => a.user_id.cmp(&b.user_id),
            SortColumn::Action => a.action.cmp(&b.action),
            SortColumn::Object => (a.object_type.as_str(), a.object_id)
                .cmp(&(b.object_type.as_str(), b.object_id)),
        };
        // Id tie-break keeps ordering deterministic for equal keys.
        primary.then(a.id.cmp(&b.id))
    }
}

impl AuditStore for MemoryAudit {
    fn append(&mut self, entry: NewAuditEntry) -> DomainResult<AuditEntryId> {
        self.next_id += 1;
        let id = AuditEntryId::new(self.next_id);
        self.entries.push(AuditEntry {
            id,
            user_id: entry.user_id,
            action: entry.action,
            object_id: entry.object_id,
            object_type: entry.object_type,
            before: entry.before,
            after: entry.after,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn query(&self, query: &AuditQuery) -> AuditPage {
        let mut rows: Vec<AuditEntry> = self
            .entries
            .iter()
            .filter(|e| Self::matches(e, query))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = Self::compare(a, b, query.sort_by);
            match query.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        let total = rows.len();
        let per_page = query.per_page.max(1);
        let page = query.page.max(1);
        let rows = rows
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();
        AuditPage { rows, total }
    }

    fn distinct_actions(&self) -> Vec<AuditAction> {
        let set: BTreeSet<AuditAction> =
            self.entries.iter().map(|e| e.action.clone()).collect();
        set.into_iter().collect()
    }

    fn total(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, id: AuditEntryId) -> Option<AuditEntry> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record;
    use shopdesk_core::UserId;

    fn seed(store: &mut MemoryAudit) -> DomainResult<()> {
        record(
            store,
            UserId::new(7),
            AuditAction::PRODUCT_CREATE,
            101,
            "product",
            &serde_json::json!(null),
            &serde_json::json!({"name": "Hoodie"}),
        )?;
        record(
            store,
            UserId::new(7),
            AuditAction::PRODUCT_EDIT,
            101,
            "product",
            &serde_json::json!({"regular_price": "10"}),
            &serde_json::json!({"regular_price": "12"}),
        )?;
        record(
            store,
            UserId::new(9),
            AuditAction::ORDER_STATUS_CHANGE,
            555,
            "order",
            &serde_json::json!({"status": "processing"}),
            &serde_json::json!({"status": "completed"}),
        )?;
        Ok(())
    }

    #[test]
    fn entries_accumulate_and_keep_ids() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;
        assert_eq!(store.total(), 3);
        let first = store.entry(AuditEntryId::new(1)).unwrap();
        assert_eq!(first.action, AuditAction::PRODUCT_CREATE);
        assert_eq!(first.object_id, 101);
        Ok(())
    }

    #[test]
    fn filters_are_conjunctive() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;

        let mut query = AuditQuery::new();
        query.filters.user_id = Some(UserId::new(7));
        query.filters.action = Some("product_edit".into());
        let page = store.query(&query);
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].action, AuditAction::PRODUCT_EDIT);
        Ok(())
    }

    #[test]
    fn search_spans_action_object_type_and_id() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;

        let mut query = AuditQuery::new();
        query.filters.search = "555".into();
        assert_eq!(store.query(&query).total, 1);

        query.filters.search = "PRODUCT".into();
        assert_eq!(store.query(&query).total, 2);
        Ok(())
    }

    #[test]
    fn unknown_sort_column_falls_back_to_date() {
        let column: SortColumn = "sneaky; drop table".parse().unwrap();
        assert_eq!(column, SortColumn::Date);
        let order: SortOrder = "sideways".parse().unwrap();
        assert_eq!(order, SortOrder::Desc);
    }

    #[test]
    fn default_ordering_is_newest_first() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;
        let page = store.query(&AuditQuery::new());
        let ids: Vec<u64> = page.rows.iter().map(|e| e.id.as_u64()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        Ok(())
    }

    #[test]
    fn sort_by_action_ascending_with_id_tiebreak() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;
        record(
            &mut store,
            UserId::new(3),
            AuditAction::PRODUCT_EDIT,
            202,
            "product",
            &serde_json::json!(null),
            &serde_json::json!(null),
        )?;

        let mut query = AuditQuery::new();
        query.sort_by = SortColumn::Action;
        query.sort_order = SortOrder::Asc;
        let ids: Vec<u64> = store
            .query(&query)
            .rows
            .iter()
            .map(|e| e.id.as_u64())
            .collect();
        // order_status_change < product_create < product_edit (x2, by id).
        assert_eq!(ids, vec![3, 1, 2, 4]);
        Ok(())
    }

    #[test]
    fn date_bounds_are_inclusive_whole_days() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;

        let today = Utc::now().date_naive();
        let mut query = AuditQuery::new();
        query.filters.date_from = Some(today);
        query.filters.date_to = Some(today);
        assert_eq!(store.query(&query).total, 3);

        query.filters.date_to = Some(today.pred_opt().unwrap());
        assert_eq!(store.query(&query).total, 0);
        Ok(())
    }

    #[test]
    fn pagination_reports_full_total() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;
        let mut query = AuditQuery::new();
        query.per_page = 2;
        query.page = 2;
        let page = store.query(&query);
        assert_eq!(page.total, 3);
        assert_eq!(page.rows.len(), 1);
        Ok(())
    }

    #[test]
    fn distinct_actions_deduplicate() -> DomainResult<()> {
        let mut store = MemoryAudit::new();
        seed(&mut store)?;
        seed(&mut store)?;
        assert_eq!(store.distinct_actions().len(), 3);
        Ok(())
    }
}
