//! `shopdesk-audit` — append-only activity trail.
//!
//! Every mutation that goes through the dashboard is recorded with its actor,
//! the object touched and before/after snapshots. Entries are never edited or
//! deleted; the query surface is filter + whitelisted sort + pagination.

pub mod entry;
pub mod memory;
pub mod query;
pub mod store;

pub use entry::{AuditAction, AuditEntry, NewAuditEntry};
pub use memory::MemoryAudit;
pub use query::{AuditFilters, AuditPage, AuditQuery, SortColumn, SortOrder};
pub use store::{AuditStore, record};
