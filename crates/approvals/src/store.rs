//! Approval storage boundary.

use shopdesk_core::{DomainResult, ProductId, RequestId, UserId};

use crate::request::{ChangeRequest, RequestStatus};

/// Persistence port for change requests.
pub trait ApprovalStore {
    fn insert(
        &mut self,
        user_id: UserId,
        product_id: Option<ProductId>,
        before_json: String,
        payload_json: String,
    ) -> DomainResult<RequestId>;

    fn get(&self, id: RequestId) -> Option<ChangeRequest>;

    /// Atomically move `id` from `from` to `to`. Returns `false` when the
    /// request is missing or not in `from` — that is how a second reviewer
    /// loses the race, not an error.
    fn try_transition(&mut self, id: RequestId, from: RequestStatus, to: RequestStatus) -> bool;

    /// Record the product a new-product request ended up creating.
    fn set_target(&mut self, id: RequestId, product_id: ProductId) -> DomainResult<()>;

    /// Requests newest first, optionally narrowed to one status. 1-based page.
    fn list(&self, status: Option<RequestStatus>, page: usize, per_page: usize)
    -> Vec<ChangeRequest>;

    fn count(&self, status: Option<RequestStatus>) -> usize;
}
