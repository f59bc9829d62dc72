//! `shopdesk-core` — shared domain foundation.
//!
//! Identifier newtypes, the domain error model, per-request settings and the
//! ownership primitive consumed by every other crate. No IO, no storage.

pub mod error;
pub mod id;
pub mod ownership;
pub mod settings;

pub use error::{DomainError, DomainResult};
pub use id::{AuditEntryId, OrderId, ProductId, RequestId, UserId, VariantId};
pub use ownership::Ownership;
pub use settings::{EditableField, OwnershipMode, Settings};
