//! `shopdesk-auth` — access policy boundary.
//!
//! Pure decision functions over an explicit user context and the per-request
//! settings. Intentionally decoupled from storage and HTTP: callers resolve
//! the acting user and the ownership of the target up front, this crate only
//! answers yes/no.

pub mod policy;
pub mod user;

pub use policy::AccessPolicy;
pub use user::{Role, UserContext};
