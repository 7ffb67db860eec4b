//! Ownership checks for catalog mutation.
//!
//! A catalog item may only be mutated by the perfumer that owns it.
//! These are pure functions with no side effects; they must run before
//! any mutating catalog operation. Creation is exempt because ownership
//! is established there by stamping the creator as owner.

use uuid::Uuid;

use super::identity::{Principal, Role};
use crate::errors::{AppError, AppResult};

/// Require that the principal is a perfumer at all.
///
/// Buyers can never own catalog items, so every mutation path starts here.
pub fn ensure_perfumer(principal: &Principal) -> AppResult<()> {
    if principal.role.is_perfumer() {
        Ok(())
    } else {
        Err(AppError::OwnershipViolation)
    }
}

/// Require that the principal is the registered owner of the item.
///
/// Allowed iff the role is perfumer and the subject id equals the
/// item's owner id; any other combination is denied.
pub fn ensure_owner(principal: &Principal, owner_id: Uuid) -> AppResult<()> {
    ensure_perfumer(principal)?;
    if principal.id == owner_id {
        Ok(())
    } else {
        Err(AppError::OwnershipViolation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "p@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_owner_perfumer_allowed() {
        let p = principal(Role::Perfumer);
        assert!(ensure_owner(&p, p.id).is_ok());
    }

    #[test]
    fn test_non_owning_perfumer_denied() {
        let p = principal(Role::Perfumer);
        let result = ensure_owner(&p, Uuid::new_v4());
        assert!(matches!(result.unwrap_err(), AppError::OwnershipViolation));
    }

    #[test]
    fn test_buyer_denied_even_with_matching_id() {
        let p = principal(Role::Buyer);
        let result = ensure_owner(&p, p.id);
        assert!(matches!(result.unwrap_err(), AppError::OwnershipViolation));
    }

    #[test]
    fn test_ensure_perfumer() {
        assert!(ensure_perfumer(&principal(Role::Perfumer)).is_ok());
        assert!(ensure_perfumer(&principal(Role::Buyer)).is_err());
    }
}
