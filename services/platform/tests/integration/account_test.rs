use encore_domain::user::{AccountStatus, UserRole};
use encore_platform::domain::types::VERIFICATION_CODE_CREATED;
use encore_platform::error::PlatformError;
use encore_platform::usecase::account::{
    ListUsersUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, VerifyEmailInput,
    VerifyEmailOutcome, VerifyEmailUseCase,
};

use crate::helpers::{MockHasher, MockUserRepo, test_token_service, test_user};

fn register_input(username: &str, email: &str) -> RegisterInput {
    RegisterInput {
        first_name: "Nina".to_owned(),
        last_name: "Simone".to_owned(),
        username: username.to_owned(),
        email: email.to_owned(),
        password: "password123".to_owned(),
        birth_date: None,
        role: UserRole::Artist,
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_pending_user_with_outbox_event() {
    let repo = MockUserRepo::default();
    let usecase = RegisterUseCase {
        users: repo.clone(),
        hasher: MockHasher,
    };

    let user = usecase
        .execute(register_input("nina", "nina@example.com"))
        .await
        .unwrap();

    assert_eq!(user.status, AccountStatus::Pending);
    assert!(!user.verified);
    assert_eq!(user.password_hash, "hashed:password123");
    let code = user.verification_code.clone().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let outbox = repo.outbox.lock().unwrap();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].kind, VERIFICATION_CODE_CREATED);
    assert_eq!(outbox[0].payload["code"], code);
    assert_eq!(outbox[0].payload["email"], "nina@example.com");
}

#[tokio::test]
async fn should_reject_duplicate_username_without_creating_row() {
    let existing = test_user("nina", UserRole::Listener, 0);
    let repo = MockUserRepo::new(vec![existing]);
    let usecase = RegisterUseCase {
        users: repo.clone(),
        hasher: MockHasher,
    };

    let result = usecase
        .execute(register_input("nina", "other@example.com"))
        .await;
    assert!(
        matches!(result, Err(PlatformError::UsernameTaken)),
        "expected UsernameTaken, got {result:?}"
    );
    assert_eq!(repo.users.lock().unwrap().len(), 1);
    assert!(repo.outbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_email_without_creating_row() {
    let existing = test_user("nina", UserRole::Listener, 0);
    let repo = MockUserRepo::new(vec![existing]);
    let usecase = RegisterUseCase {
        users: repo.clone(),
        hasher: MockHasher,
    };

    let result = usecase
        .execute(register_input("simone", "nina@example.com"))
        .await;
    assert!(matches!(result, Err(PlatformError::EmailTaken)));
    assert_eq!(repo.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_conflict_when_insert_loses_username_race() {
    let winner = test_user("nina", UserRole::Listener, 0);
    let repo = MockUserRepo {
        stale_reads: true,
        ..MockUserRepo::new(vec![winner])
    };
    let usecase = RegisterUseCase {
        users: repo.clone(),
        hasher: MockHasher,
    };

    let result = usecase
        .execute(register_input("nina", "other@example.com"))
        .await;
    assert!(
        matches!(result, Err(PlatformError::UsernameTaken)),
        "expected UsernameTaken, got {result:?}"
    );
    assert_eq!(repo.users.lock().unwrap().len(), 1);
    assert!(repo.outbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_conflict_when_insert_loses_email_race() {
    let winner = test_user("nina", UserRole::Listener, 0);
    let repo = MockUserRepo {
        stale_reads: true,
        ..MockUserRepo::new(vec![winner])
    };
    let usecase = RegisterUseCase {
        users: repo.clone(),
        hasher: MockHasher,
    };

    let result = usecase
        .execute(register_input("simone", "nina@example.com"))
        .await;
    assert!(matches!(result, Err(PlatformError::EmailTaken)));
    assert_eq!(repo.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_check_username_before_email() {
    let existing = test_user("nina", UserRole::Listener, 0);
    let usecase = RegisterUseCase {
        users: MockUserRepo::new(vec![existing]),
        hasher: MockHasher,
    };

    let result = usecase
        .execute(register_input("nina", "nina@example.com"))
        .await;
    assert!(matches!(result, Err(PlatformError::UsernameTaken)));
}

#[tokio::test]
async fn should_reject_admin_self_registration() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::default(),
        hasher: MockHasher,
    };
    let mut input = register_input("root", "root@example.com");
    input.role = UserRole::Admin;

    match usecase.execute(input).await {
        Err(PlatformError::Validation(errors)) => assert!(errors.contains_key("role")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_report_every_invalid_field() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::default(),
        hasher: MockHasher,
    };
    let input = RegisterInput {
        first_name: " ".to_owned(),
        last_name: String::new(),
        username: String::new(),
        email: "not-an-email".to_owned(),
        password: "short".to_owned(),
        birth_date: None,
        role: UserRole::Listener,
    };

    match usecase.execute(input).await {
        Err(PlatformError::Validation(errors)) => {
            for field in ["first_name", "last_name", "username", "email", "password"] {
                assert!(errors.contains_key(field), "missing error for {field}");
            }
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_token_on_valid_login() {
    let user = test_user("alice", UserRole::Artist, 0);
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        hasher: MockHasher,
        tokens: test_token_service(),
    };

    let issued = usecase.execute(login("alice", "password123")).await.unwrap();
    let claims = test_token_service().verify(&issued.token).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, UserRole::Artist);
    assert_eq!(claims.exp, issued.expires_at);
}

#[tokio::test]
async fn should_reject_unknown_user_and_wrong_password_alike() {
    let user = test_user("alice", UserRole::Listener, 0);
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        hasher: MockHasher,
        tokens: test_token_service(),
    };

    let unknown = usecase.execute(login("bob", "password123")).await;
    assert!(matches!(unknown, Err(PlatformError::InvalidCredentials)));
    let wrong = usecase.execute(login("alice", "nope")).await;
    assert!(matches!(wrong, Err(PlatformError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_blocked_login() {
    let mut user = test_user("alice", UserRole::Listener, 0);
    user.status = AccountStatus::Blocked;
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        hasher: MockHasher,
        tokens: test_token_service(),
    };

    let result = usecase.execute(login("alice", "password123")).await;
    assert!(matches!(result, Err(PlatformError::AccountBlocked)));
}

#[tokio::test]
async fn should_reject_unverified_login() {
    let mut user = test_user("alice", UserRole::Listener, 0);
    user.status = AccountStatus::Pending;
    user.verified = false;
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        hasher: MockHasher,
        tokens: test_token_service(),
    };

    let result = usecase.execute(login("alice", "password123")).await;
    assert!(matches!(result, Err(PlatformError::AccountNotVerified)));
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

fn pending_user() -> encore_platform::domain::types::User {
    let mut user = test_user("nina", UserRole::Listener, 0);
    user.status = AccountStatus::Pending;
    user.verified = false;
    user.verification_code = Some("123456".to_owned());
    user
}

#[tokio::test]
async fn should_activate_account_on_matching_code() {
    let user = pending_user();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let usecase = VerifyEmailUseCase { users: repo.clone() };

    let outcome = usecase
        .execute(VerifyEmailInput {
            email: user.email.clone(),
            code: " 123456 ".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::Verified);
    let stored = repo.get(user.id).unwrap();
    assert!(stored.verified);
    assert_eq!(stored.status, AccountStatus::Active);
    assert!(stored.verification_code.is_none());
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let user = pending_user();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let usecase = VerifyEmailUseCase { users: repo.clone() };

    let result = usecase
        .execute(VerifyEmailInput {
            email: user.email.clone(),
            code: "000000".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(PlatformError::InvalidVerificationCode)));
    assert!(!repo.get(user.id).unwrap().verified);
}

#[tokio::test]
async fn should_treat_repeat_verification_as_success() {
    let user = test_user("alice", UserRole::Listener, 0);
    let usecase = VerifyEmailUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let outcome = usecase
        .execute(VerifyEmailInput {
            email: user.email,
            code: "whatever".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(outcome, VerifyEmailOutcome::AlreadyVerified);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_email() {
    let usecase = VerifyEmailUseCase {
        users: MockUserRepo::default(),
    };

    let result = usecase
        .execute(VerifyEmailInput {
            email: "ghost@example.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(PlatformError::UserNotFound)));
}

// ── ListUsers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_page_users_ten_at_a_time_by_first_name() {
    let users: Vec<_> = (0..12)
        .map(|i| test_user(&format!("user{i:02}"), UserRole::Listener, i))
        .collect();
    let usecase = ListUsersUseCase {
        users: MockUserRepo::new(users),
    };

    let first = usecase.execute(0).await.unwrap();
    let second = usecase.execute(1).await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].username, "user00");
    assert_eq!(second[1].username, "user11");
}
