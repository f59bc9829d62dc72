//! Ownership resolution primitive.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// The two inputs that decide who owns a catalog item.
///
/// An explicit assignment always wins over authorship; a cleared or zero
/// assignment falls back to the creating user. Construct via [`Ownership::new`],
/// which normalizes the platform's `0` sentinel to `None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub assigned_to: Option<UserId>,
    pub author: UserId,
}

impl Ownership {
    pub fn new(assigned_to: Option<UserId>, author: UserId) -> Self {
        let assigned_to = assigned_to.filter(|u| u.as_u64() > 0);
        Self { assigned_to, author }
    }

    /// The user this item resolves to.
    pub fn owner(&self) -> UserId {
        self.assigned_to.unwrap_or(self.author)
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_takes_priority_over_author() {
        let o = Ownership::new(Some(UserId::new(7)), UserId::new(3));
        assert_eq!(o.owner(), UserId::new(7));
    }

    #[test]
    fn falls_back_to_author_when_unassigned() {
        let o = Ownership::new(None, UserId::new(3));
        assert_eq!(o.owner(), UserId::new(3));
    }

    #[test]
    fn zero_assignment_is_treated_as_unassigned() {
        let o = Ownership::new(Some(UserId::new(0)), UserId::new(3));
        assert!(!o.is_assigned());
        assert_eq!(o.owner(), UserId::new(3));
    }
}
