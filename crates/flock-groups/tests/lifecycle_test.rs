//! Integration tests for self-service creation and attribute updates.

mod common;

use flock_core::error::FlockError;
use flock_core::models::actor::Actor;
use flock_core::models::group::{GroupAttributes, GroupPatch, GroupRef};
use flock_core::repository::GroupRepository;

fn attrs(username: &str) -> GroupAttributes {
    GroupAttributes {
        username: Some(username.into()),
        screen_name: Some("Alice's Group".into()),
        description: Some("Things Alice likes".into()),
    }
}

#[tokio::test]
async fn self_service_creator_is_sole_admin_and_subscriber() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let alice = &created[0];
    let svc = common::service(users, groups.clone());

    let group = svc
        .create(&Actor::User(alice.id), attrs("alice_group"))
        .await
        .unwrap();

    assert_eq!(group.username, "alice_group");
    assert_eq!(group.screen_name, "Alice's Group");
    assert_eq!(group.administrators, vec![alice.id]);
    assert_eq!(group.subscribers, vec![alice.id]);
    assert!(!group.is_private);

    let stored = groups.get_by_username("alice_group").await.unwrap();
    assert_eq!(stored, group);
}

#[tokio::test]
async fn screen_name_defaults_to_username() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let svc = common::service(users, groups);

    let group = svc
        .create(
            &Actor::User(created[0].id),
            GroupAttributes {
                username: Some("Knitters".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(group.username, "knitters");
    assert_eq!(group.screen_name, "knitters");
    assert_eq!(group.description, "");
}

#[tokio::test]
async fn anonymous_actor_cannot_create() {
    let (users, groups, _) = common::setup(&[]).await;
    let svc = common::service(users, groups.clone());

    let err = svc
        .create(&Actor::Anonymous, attrs("alice_group"))
        .await
        .unwrap_err();

    assert!(matches!(err, FlockError::Unauthenticated), "got {err:?}");
    assert!(groups.get_by_username("alice_group").await.is_err());
}

#[tokio::test]
async fn missing_or_malformed_username_is_validation_error() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let svc = common::service(users, groups);
    let actor = Actor::User(created[0].id);

    let missing = svc
        .create(&actor, GroupAttributes::default())
        .await
        .unwrap_err();
    assert!(matches!(missing, FlockError::Validation { .. }), "got {missing:?}");

    let malformed = svc.create(&actor, attrs("no spaces!")).await.unwrap_err();
    assert!(
        matches!(malformed, FlockError::Validation { .. }),
        "got {malformed:?}"
    );
}

#[tokio::test]
async fn taken_username_is_conflict() {
    let (users, groups, created) = common::setup(&["alice", "bob"]).await;
    let svc = common::service(users, groups);

    svc.create(&Actor::User(created[0].id), attrs("alice_group"))
        .await
        .unwrap();

    let duplicate = svc
        .create(&Actor::User(created[1].id), attrs("alice_group"))
        .await
        .unwrap_err();
    assert!(
        matches!(duplicate, FlockError::Conflict { .. }),
        "got {duplicate:?}"
    );

    // Group usernames share the namespace with user accounts.
    let clash = svc
        .create(&Actor::User(created[1].id), attrs("alice"))
        .await
        .unwrap_err();
    assert!(matches!(clash, FlockError::Conflict { .. }), "got {clash:?}");
}

#[tokio::test]
async fn administrator_applies_partial_update() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let actor = Actor::User(created[0].id);
    let svc = common::service(users, groups);
    let group = svc.create(&actor, attrs("alice_group")).await.unwrap();

    let updated = svc
        .update(
            &actor,
            &GroupRef::Id(group.id),
            GroupPatch {
                description: Some("Updated".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, "Updated");
    assert_eq!(updated.screen_name, group.screen_name);
    assert_eq!(updated.administrators, group.administrators);
}

#[tokio::test]
async fn non_administrator_update_is_forbidden_and_changes_nothing() {
    let (users, groups, created) = common::setup(&["alice", "mallory"]).await;
    let svc = common::service(users, groups.clone());
    let group = svc
        .create(&Actor::User(created[0].id), attrs("alice_group"))
        .await
        .unwrap();
    let patch = GroupPatch {
        screen_name: Some("Mallory's Now".into()),
        ..Default::default()
    };

    for actor in [Actor::User(created[1].id), Actor::Anonymous] {
        let err = svc
            .update(&actor, &GroupRef::Username("alice_group".into()), patch.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, FlockError::Forbidden { .. }), "got {err:?}");
    }

    let stored = groups.get_by_id(group.id).await.unwrap();
    assert_eq!(stored, group);
}

#[tokio::test]
async fn update_of_unknown_group_is_not_found() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let svc = common::service(users, groups);

    let err = svc
        .update(
            &Actor::User(created[0].id),
            &GroupRef::Username("nowhere".into()),
            GroupPatch::default(),
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn invalid_patch_is_rejected() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let actor = Actor::User(created[0].id);
    let svc = common::service(users, groups);
    let group = svc.create(&actor, attrs("alice_group")).await.unwrap();

    let err = svc
        .update(
            &actor,
            &GroupRef::Id(group.id),
            GroupPatch {
                screen_name: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FlockError::Validation { .. }), "got {err:?}");
}

#[tokio::test]
async fn padded_screen_name_is_stored_trimmed() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let actor = Actor::User(created[0].id);
    let svc = common::service(users, groups.clone());
    let group = svc.create(&actor, attrs("alice_group")).await.unwrap();

    let padded = format!("abc{}", " ".repeat(100));
    let updated = svc
        .update(
            &actor,
            &GroupRef::Id(group.id),
            GroupPatch {
                screen_name: Some(padded),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.screen_name, "abc");

    let created_padded = svc
        .create(
            &actor,
            GroupAttributes {
                username: Some("padded".into()),
                screen_name: Some(format!("  Padded{}", " ".repeat(50))),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created_padded.screen_name, "Padded");

    let stored = groups.get_by_id(group.id).await.unwrap();
    assert_eq!(stored.screen_name, "abc");
}

#[tokio::test]
async fn mixed_case_group_name_finds_the_stored_group() {
    let (users, groups, created) = common::setup(&["alice"]).await;
    let actor = Actor::User(created[0].id);
    let svc = common::service(users, groups);
    let group = svc.create(&actor, attrs("Rust-Lang")).await.unwrap();
    assert_eq!(group.username, "rust-lang");

    let found = svc
        .get(&GroupRef::Username(" Rust-Lang ".into()))
        .await
        .unwrap();
    assert_eq!(found.id, group.id);
}
