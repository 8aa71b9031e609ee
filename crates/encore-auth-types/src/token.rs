//! Session token issuance and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use encore_domain::user::UserRole;

/// Errors returned by [`TokenService::verify`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `username` | custom | `String` | account username, resolved against the store on every request |
/// | `email` | custom | `String` | account email at issue time |
/// | `role` | custom | [`UserRole`] | role at issue time (informational, the stored role wins) |
/// | `iat` | `iat` | seconds since epoch | issue time |
/// | `exp` | `exp` | seconds since epoch | expiration, `iat + ttl` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub expires_at: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// HS256 token signer and verifier.
///
/// Stateless: tokens are never revoked server-side. Account status is re-checked
/// by the caller after [`TokenService::verify`] succeeds.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_secs: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    /// Expiry a token issued at this instant would carry.
    pub fn expiration_timestamp(&self) -> u64 {
        now_secs() + self.ttl_secs
    }

    pub fn issue(
        &self,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let iat = now_secs();
        let claims = SessionClaims {
            username: username.to_owned(),
            email: email.to_owned(),
            role,
            iat,
            exp: iat + self.ttl_secs,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Decode and validate a token.
    ///
    /// Validation: HS256 only, no leeway, required claim `exp`. A token whose `exp`
    /// equals the current second is already expired.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })?;

        if now_secs() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
