//! Self-or-admin visibility: citizens are scoped to their own complaints,
//! admins see everything.

use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::types::Role;

/// Whether `requester` may read records owned by `owner`.
/// `owner` is `None` when the caller supplied an id that is not a valid identity.
pub fn can_view(requester: &AuthUser, owner: Option<Uuid>) -> bool {
    match requester.role {
        Role::Admin => true,
        Role::Citizen => owner == Some(requester.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser { id: Uuid::new_v4(), role }
    }

    #[test]
    fn citizen_sees_only_own_records() {
        let citizen = user(Role::Citizen);
        assert!(can_view(&citizen, Some(citizen.id)));
        assert!(!can_view(&citizen, Some(Uuid::new_v4())));
        assert!(!can_view(&citizen, None));
    }

    #[test]
    fn admin_sees_everything() {
        let admin = user(Role::Admin);
        assert!(can_view(&admin, Some(Uuid::new_v4())));
        assert!(can_view(&admin, Some(admin.id)));
        assert!(can_view(&admin, None));
    }
}
