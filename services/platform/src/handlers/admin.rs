use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::user::UserRole;

use crate::error::PlatformError;
use crate::handlers::account::UserResponse;
use crate::handlers::extract::{Json, Path, Query};
use crate::handlers::principal::Principal;
use crate::state::AppState;
use crate::usecase::admin::{
    AccountChange, ChangeAccountUseCase, DeleteUserUseCase, ListUsersByRoleUseCase,
};

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn delete_user(
    principal: Principal,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&principal.actor(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/users/{id}/{promote,block,unblock} ───────────────────────────

async fn change_with(
    state: &AppState,
    principal: &Principal,
    user_id: Uuid,
    change: AccountChange,
) -> Result<Json<UserResponse>, PlatformError> {
    let usecase = ChangeAccountUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(&principal.actor(), user_id, change)
        .await?;
    Ok(Json(user.into()))
}

pub async fn promote_user(
    principal: Principal,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, PlatformError> {
    change_with(&state, &principal, user_id, AccountChange::Promote).await
}

pub async fn block_user(
    principal: Principal,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, PlatformError> {
    change_with(&state, &principal, user_id, AccountChange::Block).await
}

pub async fn unblock_user(
    principal: Principal,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, PlatformError> {
    change_with(&state, &principal, user_id, AccountChange::Unblock).await
}

// ── GET /admin/users?role= ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UsersByRoleQuery {
    pub role: UserRole,
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

pub async fn list_users_by_role(
    principal: Principal,
    State(state): State<AppState>,
    Query(query): Query<UsersByRoleQuery>,
) -> Result<Json<Vec<UserResponse>>, PlatformError> {
    let usecase = ListUsersByRoleUseCase {
        users: state.user_repo(),
    };
    let page = PageRequest::new(
        query.page,
        query.size.unwrap_or(PageRequest::default().size),
    );
    let users = usecase
        .execute(&principal.actor(), query.role, page)
        .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
