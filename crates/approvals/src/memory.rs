//! In-memory approval store.

use std::collections::BTreeMap;

use chrono::Utc;

use shopdesk_core::{DomainError, DomainResult, ProductId, RequestId, UserId};

use crate::request::{ChangeRequest, RequestStatus};
use crate::store::ApprovalStore;

#[derive(Debug, Default)]
pub struct MemoryApprovals {
    requests: BTreeMap<RequestId, ChangeRequest>,
    next_id: u64,
}

impl MemoryApprovals {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ApprovalStore for MemoryApprovals {
    fn insert(
        &mut self,
        user_id: UserId,
        product_id: Option<ProductId>,
        before_json: String,
        payload_json: String,
    ) -> DomainResult<RequestId> {
        self.next_id += 1;
        let id = RequestId::new(self.next_id);
        self.requests.insert(
            id,
            ChangeRequest {
                id,
                user_id,
                product_id,
                status: RequestStatus::Pending,
                before_json,
                payload_json,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    fn get(&self, id: RequestId) -> Option<ChangeRequest> {
        self.requests.get(&id).cloned()
    }

    fn try_transition(&mut self, id: RequestId, from: RequestStatus, to: RequestStatus) -> bool {
        match self.requests.get_mut(&id) {
            Some(request) if request.status == from => {
                request.status = to;
                true
            }
            _ => false,
        }
    }

    fn set_target(&mut self, id: RequestId, product_id: ProductId) -> DomainResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| DomainError::persistence(format!("unknown request {id}")))?;
        request.product_id = Some(product_id);
        Ok(())
    }

    fn list(
        &self,
        status: Option<RequestStatus>,
        page: usize,
        per_page: usize,
    ) -> Vec<ChangeRequest> {
        let per_page = per_page.max(1);
        let page = page.max(1);
        self.requests
            .values()
            .rev()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect()
    }

    fn count(&self, status: Option<RequestStatus>) -> usize {
        self.requests
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .count()
    }
}
