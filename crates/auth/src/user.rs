//! Acting-user context.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use shopdesk_core::UserId;

/// Role identifier as reported by the host platform.
///
/// Roles are opaque strings at this layer; the settings record decides which
/// of them grant dashboard access.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the authenticated user for one request.
///
/// Built by the platform layer from its session; an unauthenticated request
/// is represented by passing `None` to the policy functions, never by a
/// placeholder context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub id: UserId,
    pub roles: BTreeSet<Role>,
    /// The platform's administrator capability. Trumps every partner rule.
    pub manage_all: bool,
    /// Base read capability; whitelist/role access requires it.
    pub can_read: bool,
}

impl UserContext {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            roles: BTreeSet::new(),
            manage_all: false,
            can_read: true,
        }
    }

    pub fn with_role(mut self, role: impl Into<Cow<'static, str>>) -> Self {
        self.roles.insert(Role::new(role));
        self
    }

    pub fn with_manage_all(mut self) -> Self {
        self.manage_all = true;
        self
    }

    /// Does any of the user's roles appear in `allowed`?
    pub fn has_role_in(&self, allowed: &BTreeSet<String>) -> bool {
        self.roles.iter().any(|r| allowed.contains(r.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_intersection() {
        let user = UserContext::new(UserId::new(5)).with_role("shop_manager");
        let mut allowed = BTreeSet::new();
        allowed.insert("shop_manager".to_string());
        assert!(user.has_role_in(&allowed));

        let disjoint = BTreeSet::from(["editor".to_string()]);
        assert!(!user.has_role_in(&disjoint));
    }
}
