//! `shopdesk-approvals` — change-approval queue for product edits.
//!
//! When approval is required, a partner's edit is captured as a pending
//! [`request::ChangeRequest`] holding the before-snapshot and the proposed
//! payload as JSON. A reviewer approves (payload is applied to the live
//! catalog) or rejects; either way the request reaches a terminal state
//! exactly once.

pub mod diff;
pub mod memory;
pub mod request;
pub mod store;
pub mod workflow;

pub use diff::{FieldChange, TRACKED_FIELDS, build_diff};
pub use memory::MemoryApprovals;
pub use request::{ChangeRequest, ChangeRequestView, RequestStatus};
pub use store::ApprovalStore;
pub use workflow::{Decision, create_request, requests, review};
