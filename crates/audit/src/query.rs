//! Query surface for the audit trail.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopdesk_core::UserId;

use crate::entry::AuditEntry;

/// Row filters. All are conjunctive; `search` matches action, object type and
/// object id as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFilters {
    pub search: String,
    pub action: Option<String>,
    pub user_id: Option<UserId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Columns the caller may sort by. Anything else falls back to [`Date`].
///
/// [`Date`]: SortColumn::Date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    Date,
    User,
    Action,
    Object,
}

impl FromStr for SortColumn {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "user" => SortColumn::User,
            "action" => SortColumn::Action,
            "object" => SortColumn::Object,
            _ => SortColumn::Date,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "asc" | "ASC" => SortOrder::Asc,
            _ => SortOrder::Desc,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub filters: AuditFilters,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
}

impl AuditQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: 20,
            ..Self::default()
        }
    }
}

/// One page of results plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditPage {
    pub rows: Vec<AuditEntry>,
    pub total: usize,
}
