use chrono::Utc;
use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;
use encore_domain::user::{AccountStatus, UserRole};

use crate::domain::repository::UserRepository;
use crate::domain::types::{Actor, User};
use crate::error::PlatformError;
use crate::usecase::ensure_allowed;

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, actor: &Actor, user_id: Uuid) -> Result<(), PlatformError> {
        ensure_allowed(actor, Action::DeleteUser)?;
        if !self.users.delete_cascade(user_id).await? {
            return Err(PlatformError::UserNotFound);
        }
        tracing::info!(user_id = %user_id, admin_id = %actor.id, "user deleted");
        Ok(())
    }
}

// ── Promote / Block / Unblock ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    /// Grants ADMIN and forces the account active and verified.
    Promote,
    Block,
    Unblock,
}

impl AccountChange {
    fn action(self) -> Action {
        match self {
            Self::Promote => Action::PromoteUser,
            Self::Block => Action::BlockUser,
            Self::Unblock => Action::UnblockUser,
        }
    }

    fn apply(self, user: &mut User) {
        match self {
            Self::Promote => {
                user.role = UserRole::Admin;
                user.status = AccountStatus::Active;
                user.verified = true;
                user.verification_code = None;
            }
            Self::Block => user.status = AccountStatus::Blocked,
            Self::Unblock => {
                user.status = if user.verified {
                    AccountStatus::Active
                } else {
                    AccountStatus::Pending
                };
            }
        }
    }
}

pub struct ChangeAccountUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangeAccountUseCase<U> {
    pub async fn execute(
        &self,
        actor: &Actor,
        user_id: Uuid,
        change: AccountChange,
    ) -> Result<User, PlatformError> {
        ensure_allowed(actor, change.action())?;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(PlatformError::UserNotFound)?;

        change.apply(&mut user);
        user.updated_at = Utc::now();
        self.users.update_account(&user).await?;
        tracing::info!(user_id = %user.id, admin_id = %actor.id, change = ?change, "account changed");
        Ok(user)
    }
}

// ── ListUsersByRole ──────────────────────────────────────────────────────────

pub struct ListUsersByRoleUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersByRoleUseCase<U> {
    pub async fn execute(
        &self,
        actor: &Actor,
        role: UserRole,
        page: PageRequest,
    ) -> Result<Vec<User>, PlatformError> {
        ensure_allowed(actor, Action::ListUsersByRole)?;
        self.users.list_by_role(role, page.clamped()).await
    }
}
