//! Authorization decisions for mutation endpoints.
//!
//! Identity comes from the session row loaded by the auth extractor; the role
//! stored there is the only one consulted. A role field in a request body is
//! never trusted.

use crate::error::ApiError;
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Unknown role strings fall back to the unprivileged role.
    pub fn parse(s: &str) -> Role {
        if s == "admin" {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// The authenticated identity an authorization decision consumes.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            id: user.id,
            role: Role::parse(&user.role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Forbidden,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allowed
    }

    pub fn require(self) -> Result<(), ApiError> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Forbidden => Err(ApiError::Forbidden),
        }
    }
}

fn decide(allowed: bool) -> Decision {
    if allowed {
        Decision::Allowed
    } else {
        Decision::Forbidden
    }
}

/// Recipe mutations: the author may edit, and admins may moderate.
pub fn owner_or_admin(actor: &Actor, owner_id: i32) -> Decision {
    decide(actor.id == owner_id || actor.role == Role::Admin)
}

/// Collection mutations: strictly the owner, with no admin override.
pub fn owner_only(actor: &Actor, owner_id: i32) -> Decision {
    decide(actor.id == owner_id)
}

/// Moderation endpoints under /api/admin.
pub fn admin_only(actor: &Actor) -> Decision {
    decide(actor.role == Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> Actor {
        Actor {
            id,
            role: Role::User,
        }
    }

    fn admin(id: i32) -> Actor {
        Actor {
            id,
            role: Role::Admin,
        }
    }

    #[test]
    fn owner_may_mutate_own_recipe() {
        assert!(owner_or_admin(&user(1), 1).is_allowed());
    }

    #[test]
    fn admin_may_mutate_any_recipe() {
        assert!(owner_or_admin(&admin(2), 1).is_allowed());
    }

    #[test]
    fn stranger_may_not_mutate_recipe() {
        assert_eq!(owner_or_admin(&user(2), 1), Decision::Forbidden);
    }

    #[test]
    fn collections_have_no_admin_override() {
        assert!(owner_only(&user(1), 1).is_allowed());
        assert_eq!(owner_only(&admin(2), 1), Decision::Forbidden);
    }

    #[test]
    fn admin_gate_rejects_regular_users() {
        assert!(admin_only(&admin(1)).is_allowed());
        assert_eq!(admin_only(&user(1)), Decision::Forbidden);
    }

    #[test]
    fn unknown_role_string_is_unprivileged() {
        assert_eq!(Role::parse("superadmin"), Role::User);
        assert_eq!(Role::parse("admin"), Role::Admin);
    }

    #[test]
    fn require_maps_to_forbidden_error() {
        assert!(Decision::Allowed.require().is_ok());
        assert!(matches!(
            Decision::Forbidden.require(),
            Err(crate::error::ApiError::Forbidden)
        ));
    }
}
