//! Authorization seam for admin-only actions.

use std::collections::BTreeSet;

use crate::ids::UserId;

/// Decides who may run admin-only actions (`ban`, `restart`).
pub trait AdminPolicy: Send + Sync {
    /// Whether `user` holds admin rights.
    fn is_admin(&self, user: UserId) -> bool;
}

/// A fixed set of admin ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(BTreeSet<UserId>);

impl AllowList {
    /// Creates an allow-list from ids.
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Number of admins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is an admin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AdminPolicy for AllowList {
    fn is_admin(&self, user: UserId) -> bool {
        self.0.contains(&user)
    }
}
