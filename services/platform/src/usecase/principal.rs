use encore_auth_types::token::TokenService;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::PlatformError;

/// Turn a bearer token into the live stored account.
///
/// Every rejection is `Unauthenticated`: bad token, unknown username, and accounts
/// that are blocked, pending or unverified even when the token is still valid.
pub struct ResolvePrincipalUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenService,
}

impl<U: UserRepository> ResolvePrincipalUseCase<U> {
    pub async fn execute(&self, token: &str) -> Result<User, PlatformError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            PlatformError::Unauthenticated
        })?;

        let user = self
            .users
            .find_by_username(&claims.username)
            .await?
            .ok_or(PlatformError::Unauthenticated)?;

        if !user.can_sign_in() {
            return Err(PlatformError::Unauthenticated);
        }
        Ok(user)
    }
}
