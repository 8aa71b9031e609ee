use encore_domain::user::{AccountStatus, UserRole};
use encore_platform::error::PlatformError;
use encore_platform::usecase::principal::ResolvePrincipalUseCase;

use crate::helpers::{MockUserRepo, test_token_service, test_user};

fn token_for(username: &str, role: UserRole) -> String {
    test_token_service()
        .issue(username, &format!("{username}@example.com"), role)
        .unwrap()
        .token
}

#[tokio::test]
async fn should_resolve_active_verified_user() {
    let user = test_user("alice", UserRole::Listener, 0);
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        tokens: test_token_service(),
    };

    let resolved = usecase
        .execute(&token_for("alice", UserRole::Listener))
        .await
        .unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn should_use_live_role_not_token_role() {
    let mut user = test_user("alice", UserRole::Listener, 0);
    user.role = UserRole::Admin;
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_token_service(),
    };

    let resolved = usecase
        .execute(&token_for("alice", UserRole::Listener))
        .await
        .unwrap();
    assert_eq!(resolved.role, UserRole::Admin);
}

#[tokio::test]
async fn should_reject_unknown_username_as_unauthenticated() {
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::default(),
        tokens: test_token_service(),
    };

    let result = usecase.execute(&token_for("ghost", UserRole::Listener)).await;
    assert!(
        matches!(result, Err(PlatformError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_blocked_user_with_valid_token() {
    let mut user = test_user("mallory", UserRole::Artist, 0);
    user.status = AccountStatus::Blocked;
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_token_service(),
    };

    let result = usecase.execute(&token_for("mallory", UserRole::Artist)).await;
    assert!(matches!(result, Err(PlatformError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_pending_unverified_user() {
    let mut user = test_user("newbie", UserRole::Listener, 0);
    user.status = AccountStatus::Pending;
    user.verified = false;
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_token_service(),
    };

    let result = usecase.execute(&token_for("newbie", UserRole::Listener)).await;
    assert!(matches!(result, Err(PlatformError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let user = test_user("alice", UserRole::Listener, 0);
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_token_service(),
    };

    let result = usecase.execute("not.a.jwt").await;
    assert!(matches!(result, Err(PlatformError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_token_from_other_secret() {
    let user = test_user("alice", UserRole::Listener, 0);
    let usecase = ResolvePrincipalUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_token_service(),
    };
    let foreign = encore_auth_types::token::TokenService::new("another-secret", 3600)
        .issue("alice", "alice@example.com", UserRole::Listener)
        .unwrap()
        .token;

    let result = usecase.execute(&foreign).await;
    assert!(matches!(result, Err(PlatformError::Unauthenticated)));
}
