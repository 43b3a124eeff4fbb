//! Integration tests for User repository using in-memory SurrealDB.

use flock_core::error::FlockError;
use flock_core::models::user::CreateUser;
use flock_core::repository::UserRepository;
use flock_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> SurrealUserRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    flock_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = setup().await;

    let user = repo
        .create(CreateUser {
            username: "alice".into(),
            screen_name: Some("Alice".into()),
        })
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.screen_name, "Alice");

    let by_id = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(by_id, user);

    let by_name = repo.get_by_username("alice").await.unwrap();
    assert_eq!(by_name.id, user.id);
}

#[tokio::test]
async fn screen_name_defaults_to_username() {
    let repo = setup().await;

    let user = repo
        .create(CreateUser {
            username: "bob".into(),
            screen_name: None,
        })
        .await
        .unwrap();

    assert_eq!(user.screen_name, "bob");
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_username("ghost").await.unwrap_err();
    assert!(matches!(err, FlockError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let repo = setup().await;

    repo.create(CreateUser {
        username: "carol".into(),
        screen_name: None,
    })
    .await
    .unwrap();

    let err = repo
        .create(CreateUser {
            username: "carol".into(),
            screen_name: None,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, FlockError::Conflict { .. }),
        "expected Conflict, got {err:?}"
    );
}

#[tokio::test]
async fn username_is_stored_lowercased() {
    let repo = setup().await;

    let user = repo
        .create(CreateUser {
            username: " Dave ".into(),
            screen_name: None,
        })
        .await
        .unwrap();

    assert_eq!(user.username, "dave");
    assert_eq!(user.screen_name, "Dave");
    assert_eq!(repo.get_by_username("dave").await.unwrap().id, user.id);
}
