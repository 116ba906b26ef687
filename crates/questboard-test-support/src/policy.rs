//! Test admin policies.

use questboard_core::ids::UserId;
use questboard_core::policy::AdminPolicy;

/// Grants or denies admin rights to everyone alike.
#[derive(Debug, Clone, Copy)]
pub struct StaticAdminPolicy(pub bool);

impl StaticAdminPolicy {
    /// Everyone is an admin.
    #[must_use]
    pub fn allow_all() -> Self {
        Self(true)
    }

    /// Nobody is an admin.
    #[must_use]
    pub fn deny_all() -> Self {
        Self(false)
    }
}

impl AdminPolicy for StaticAdminPolicy {
    fn is_admin(&self, _user: UserId) -> bool {
        self.0
    }
}
