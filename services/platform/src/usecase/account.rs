use chrono::{NaiveDate, Utc};
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use encore_auth_types::token::{IssuedToken, TokenService};
use encore_domain::pagination::PageRequest;
use encore_domain::user::{AccountStatus, UserRole};

use crate::domain::repository::{CredentialHasher, UserRepository};
use crate::domain::types::{
    MIN_PASSWORD_LEN, OutboxEvent, USER_PAGE_SIZE, User, VERIFICATION_CODE_CREATED,
    VERIFICATION_CODE_RANGE,
};
use crate::domain::validation::FieldErrors;
use crate::error::PlatformError;

fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(VERIFICATION_CODE_RANGE).to_string()
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub birth_date: Option<NaiveDate>,
    pub role: UserRole,
}

impl RegisterInput {
    fn validate(&self) -> Result<(), PlatformError> {
        let mut errors = FieldErrors::new();
        errors.require_non_blank("first_name", &self.first_name);
        errors.require_non_blank("last_name", &self.last_name);
        errors.require_non_blank("username", &self.username);
        errors.require_email("email", &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "must be at least 8 characters");
        }
        if self.role == UserRole::Admin {
            errors.add("role", "must be LISTENER or ARTIST");
        }
        errors.into_result()
    }
}

pub struct RegisterUseCase<U: UserRepository, H: CredentialHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: CredentialHasher> RegisterUseCase<U, H> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, PlatformError> {
        input.validate()?;

        if self.users.exists_by_username(&input.username).await? {
            return Err(PlatformError::UsernameTaken);
        }
        if self.users.exists_by_email(&input.email).await? {
            return Err(PlatformError::EmailTaken);
        }

        let now = Utc::now();
        let code = generate_verification_code();
        let user = User {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            username: input.username,
            email: input.email,
            birth_date: input.birth_date,
            password_hash: self.hasher.hash(&input.password)?,
            role: input.role,
            status: AccountStatus::Pending,
            verified: false,
            verification_code: Some(code.clone()),
            created_at: now,
            updated_at: now,
        };

        // Mail delivery happens out of band from the outbox row.
        let event = OutboxEvent {
            id: Uuid::now_v7(),
            kind: VERIFICATION_CODE_CREATED.to_owned(),
            payload: json!({
                "email": user.email,
                "username": user.username,
                "code": code,
            }),
            idempotency_key: format!("{VERIFICATION_CODE_CREATED}:{}", user.id),
        };

        self.users.create_with_outbox(&user, &event).await?;
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository, H: CredentialHasher> {
    pub users: U,
    pub hasher: H,
    pub tokens: TokenService,
}

impl<U: UserRepository, H: CredentialHasher> LoginUseCase<U, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<IssuedToken, PlatformError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(PlatformError::InvalidCredentials)?;

        if user.status == AccountStatus::Blocked {
            return Err(PlatformError::AccountBlocked);
        }
        if !self.hasher.verify(&input.password, &user.password_hash)? {
            return Err(PlatformError::InvalidCredentials);
        }
        if !user.verified {
            return Err(PlatformError::AccountNotVerified);
        }

        self.tokens
            .issue(&user.username, &user.email, user.role)
            .map_err(|e| PlatformError::Internal(e.into()))
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyEmailOutcome {
    Verified,
    AlreadyVerified,
}

pub struct VerifyEmailUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> VerifyEmailUseCase<U> {
    pub async fn execute(
        &self,
        input: VerifyEmailInput,
    ) -> Result<VerifyEmailOutcome, PlatformError> {
        let mut user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(PlatformError::UserNotFound)?;

        if user.verified {
            return Ok(VerifyEmailOutcome::AlreadyVerified);
        }
        if user.verification_code.as_deref() != Some(input.code.trim()) {
            return Err(PlatformError::InvalidVerificationCode);
        }

        user.verified = true;
        user.verification_code = None;
        // A blocked account stays blocked after confirming its email.
        if user.status == AccountStatus::Pending {
            user.status = AccountStatus::Active;
        }
        user.updated_at = Utc::now();
        self.users.update_account(&user).await?;
        Ok(VerifyEmailOutcome::Verified)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self, page: u32) -> Result<Vec<User>, PlatformError> {
        self.users
            .list(PageRequest::new(page, USER_PAGE_SIZE))
            .await
    }
}
