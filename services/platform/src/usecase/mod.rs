pub mod account;
pub mod admin;
pub mod album;
pub mod listen;
pub mod playlist;
pub mod principal;
pub mod recommendation;
pub mod report;
pub mod track;

use uuid::Uuid;

use encore_domain::policy::{self, Action};

use crate::domain::types::Actor;
use crate::error::PlatformError;

/// Role gate. Fails with `Forbidden`.
pub fn ensure_allowed(actor: &Actor, action: Action) -> Result<(), PlatformError> {
    if policy::allowed(actor.role, action) {
        Ok(())
    } else {
        Err(PlatformError::Forbidden)
    }
}

/// Role gate plus ownership. Call after the target entity was found.
pub fn ensure_owner_or_admin(
    actor: &Actor,
    action: Action,
    owner_id: Uuid,
) -> Result<(), PlatformError> {
    ensure_allowed(actor, action)?;
    if policy::is_owner_or_admin(actor.id, actor.role, owner_id) {
        Ok(())
    } else {
        Err(PlatformError::Forbidden)
    }
}
