use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::user::{AccountStatus, UserRole};
use encore_platform::error::PlatformError;
use encore_platform::usecase::admin::{
    AccountChange, ChangeAccountUseCase, DeleteUserUseCase, ListUsersByRoleUseCase,
};

use crate::helpers::{MockUserRepo, actor, test_user};

#[tokio::test]
async fn should_forbid_non_admin_from_every_account_change() {
    let target = test_user("target", UserRole::Listener, 0);
    let usecase = ChangeAccountUseCase {
        users: MockUserRepo::new(vec![target.clone()]),
    };

    for change in [
        AccountChange::Promote,
        AccountChange::Block,
        AccountChange::Unblock,
    ] {
        let result = usecase
            .execute(&actor(UserRole::Artist), target.id, change)
            .await;
        assert!(
            matches!(result, Err(PlatformError::Forbidden)),
            "{change:?} should be forbidden"
        );
    }
}

#[tokio::test]
async fn should_promote_pending_user_to_active_admin() {
    let mut target = test_user("target", UserRole::Listener, 0);
    target.status = AccountStatus::Pending;
    target.verified = false;
    target.verification_code = Some("123456".to_owned());
    let repo = MockUserRepo::new(vec![target.clone()]);
    let usecase = ChangeAccountUseCase {
        users: repo.clone(),
    };

    usecase
        .execute(&actor(UserRole::Admin), target.id, AccountChange::Promote)
        .await
        .unwrap();

    let stored = repo.get(target.id).unwrap();
    assert_eq!(stored.role, UserRole::Admin);
    assert_eq!(stored.status, AccountStatus::Active);
    assert!(stored.verified);
    assert!(stored.verification_code.is_none());
}

#[tokio::test]
async fn should_block_and_unblock() {
    let target = test_user("target", UserRole::Artist, 0);
    let repo = MockUserRepo::new(vec![target.clone()]);
    let usecase = ChangeAccountUseCase {
        users: repo.clone(),
    };
    let admin = actor(UserRole::Admin);

    usecase
        .execute(&admin, target.id, AccountChange::Block)
        .await
        .unwrap();
    assert_eq!(repo.get(target.id).unwrap().status, AccountStatus::Blocked);

    usecase
        .execute(&admin, target.id, AccountChange::Unblock)
        .await
        .unwrap();
    assert_eq!(repo.get(target.id).unwrap().status, AccountStatus::Active);
}

#[tokio::test]
async fn should_return_user_not_found_for_missing_target() {
    let usecase = ChangeAccountUseCase {
        users: MockUserRepo::default(),
    };

    let result = usecase
        .execute(&actor(UserRole::Admin), Uuid::new_v4(), AccountChange::Block)
        .await;
    assert!(matches!(result, Err(PlatformError::UserNotFound)));
}

#[tokio::test]
async fn should_delete_user() {
    let target = test_user("target", UserRole::Artist, 0);
    let repo = MockUserRepo::new(vec![target.clone()]);
    let usecase = DeleteUserUseCase {
        users: repo.clone(),
    };

    usecase
        .execute(&actor(UserRole::Admin), target.id)
        .await
        .unwrap();
    assert!(repo.get(target.id).is_none());

    let again = usecase.execute(&actor(UserRole::Admin), target.id).await;
    assert!(matches!(again, Err(PlatformError::UserNotFound)));
}

#[tokio::test]
async fn should_list_users_by_role() {
    let users = vec![
        test_user("artist_a", UserRole::Artist, 0),
        test_user("listener", UserRole::Listener, 1),
        test_user("artist_b", UserRole::Artist, 2),
    ];
    let usecase = ListUsersByRoleUseCase {
        users: MockUserRepo::new(users),
    };

    let artists = usecase
        .execute(
            &actor(UserRole::Admin),
            UserRole::Artist,
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(artists.len(), 2);
    assert!(artists.iter().all(|u| u.role == UserRole::Artist));

    let denied = usecase
        .execute(
            &actor(UserRole::Listener),
            UserRole::Artist,
            PageRequest::default(),
        )
        .await;
    assert!(matches!(denied, Err(PlatformError::Forbidden)));
}
