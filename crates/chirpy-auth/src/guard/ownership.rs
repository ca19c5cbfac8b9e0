//! Ownership checks before mutating a resource.

use tracing::warn;

use chirpy_core::types::UserId;
use chirpy_entity::chirp::Chirp;

use crate::error::AuthError;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The caller owns the resource.
    Allowed,
    /// The caller does not own the resource.
    Forbidden,
}

/// A resource with a recorded owner.
///
/// Implementations must return the owner as loaded from storage.
pub trait Owned {
    /// The account that owns this resource.
    fn owner(&self) -> UserId;
}

impl Owned for Chirp {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// Compares a validated caller identity against a stored owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Pure equality decision.
    pub fn decide(caller: UserId, owner: UserId) -> Decision {
        if caller == owner {
            Decision::Allowed
        } else {
            Decision::Forbidden
        }
    }

    /// Fails with [`AuthError::OwnershipMismatch`] unless `caller` is `owner`.
    pub fn authorize(caller: UserId, owner: UserId) -> Result<(), AuthError> {
        match Self::decide(caller, owner) {
            Decision::Allowed => Ok(()),
            Decision::Forbidden => {
                warn!(caller = %caller, owner = %owner, "Ownership check denied");
                Err(AuthError::OwnershipMismatch)
            }
        }
    }

    /// [`authorize`](Self::authorize) against a loaded resource.
    pub fn authorize_resource(caller: UserId, resource: &impl Owned) -> Result<(), AuthError> {
        Self::authorize(caller, resource.owner())
    }
}
