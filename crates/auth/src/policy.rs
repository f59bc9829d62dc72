//! Access policy decisions.
//!
//! Every function here is a pure function of (user, settings, target). The
//! caller resolves the target's [`Ownership`] from storage first; a target
//! that no longer exists is passed as `None` and always denied, which keeps
//! "not found" indistinguishable from "not yours".

use shopdesk_core::{Ownership, OwnershipMode, Settings, UserId};

use crate::user::UserContext;

/// Policy gate over one request's settings.
#[derive(Debug, Copy, Clone)]
pub struct AccessPolicy<'a> {
    settings: &'a Settings,
}

impl<'a> AccessPolicy<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// May this user open the partner dashboard at all?
    pub fn can_access_dashboard(&self, user: Option<&UserContext>) -> bool {
        let Some(user) = user else {
            return false;
        };

        if !self.settings.enabled {
            return false;
        }

        if user.manage_all {
            return true;
        }

        if self.settings.is_whitelisted(user.id) {
            return user.can_read;
        }

        if user.has_role_in(&self.settings.allowed_roles) {
            return user.can_read;
        }

        false
    }

    /// Is this user a partner (non-admin with dashboard scope)?
    ///
    /// Admin capability always wins: a manage-all user is never a partner,
    /// even when whitelisted.
    pub fn is_partner(&self, user: Option<&UserContext>) -> bool {
        let Some(user) = user else {
            return false;
        };

        if user.manage_all {
            return false;
        }

        self.settings.is_whitelisted(user.id) || user.has_role_in(&self.settings.allowed_roles)
    }

    /// Explicit assignment wins; otherwise the authoring user owns the item.
    pub fn resolve_owner(&self, ownership: &Ownership) -> UserId {
        ownership.owner()
    }

    /// May this user edit the product whose ownership is `target`?
    ///
    /// `target = None` means the product could not be resolved and is never
    /// manageable.
    pub fn can_manage_product(
        &self,
        user: Option<&UserContext>,
        target: Option<&Ownership>,
    ) -> bool {
        let Some(user) = user else {
            return false;
        };

        if !self.can_access_dashboard(Some(user)) {
            return false;
        }

        if user.manage_all {
            return true;
        }

        if self.settings.ownership_mode == OwnershipMode::Shared {
            return true;
        }

        match target {
            Some(ownership) => self.resolve_owner(ownership) == user.id,
            None => false,
        }
    }

    /// May this user view an order whose line items resolve to `line_owners`?
    ///
    /// Under restricted mode an order is visible iff at least one line item's
    /// product is owned by the user.
    pub fn can_view_order(&self, user: Option<&UserContext>, line_owners: &[Ownership]) -> bool {
        let Some(user) = user else {
            return false;
        };

        if !self.can_access_dashboard(Some(user)) {
            return false;
        }

        if user.manage_all {
            return true;
        }

        if self.settings.ownership_mode == OwnershipMode::Shared {
            return true;
        }

        line_owners.iter().any(|o| self.resolve_owner(o) == user.id)
    }

    /// Do this user's product mutations go through the approval queue?
    pub fn approval_required(&self, user: Option<&UserContext>) -> bool {
        if !self.settings.require_product_approval {
            return false;
        }

        match user {
            Some(u) if u.manage_all => false,
            _ => self.is_partner(user),
        }
    }
}
