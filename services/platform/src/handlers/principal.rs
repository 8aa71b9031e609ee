//! Bearer-token principal extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use encore_auth_types::bearer::bearer_token;

use crate::domain::types::{Actor, User};
use crate::error::PlatformError;
use crate::state::AppState;
use crate::usecase::principal::ResolvePrincipalUseCase;

/// The live, active account behind the request's `Authorization: Bearer` token.
///
/// Rejects with `Unauthenticated` when the header is missing or not a bearer
/// credential, or when resolution fails.
#[derive(Debug, Clone)]
pub struct Principal(pub User);

impl Principal {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = PlatformError;

    // Extract synchronously so the returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers);
        let usecase = ResolvePrincipalUseCase {
            users: state.user_repo(),
            tokens: state.tokens.clone(),
        };

        async move {
            let token = token
                .map_err(|_| PlatformError::Unauthenticated)?
                .ok_or(PlatformError::Unauthenticated)?;
            let user = usecase.execute(&token).await?;
            Ok(Self(user))
        }
    }
}
