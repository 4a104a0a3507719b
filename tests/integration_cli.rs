mod common;

use common::MemoryCredentialStore;
use schooldesk::cli::create_user;
use schooldesk_core::Role;
use schooldesk_db::CredentialStore;

#[tokio::test]
async fn test_create_user_stores_bcrypt_hash() {
    let store = MemoryCredentialStore::default();

    let user = create_user(&store, "  msjones ", "correct horse", Role::Teacher)
        .await
        .unwrap();

    assert_eq!(user.username, "msjones");
    assert_eq!(user.role, Role::Teacher);
    assert_ne!(user.password_hash, "correct horse");
    assert!(bcrypt::verify("correct horse", &user.password_hash).unwrap());

    let found = store.find_user("msjones", Role::Teacher).await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_create_user_same_name_other_role() {
    let store = MemoryCredentialStore::default();
    store.add_user("alex", "password1", Role::Student);

    let result = create_user(&store, "alex", "password2", Role::Parent).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_user_rejects_duplicates() {
    let store = MemoryCredentialStore::default();
    store.add_user("alex", "password1", Role::Student);

    let err = create_user(&store, "alex", "password2", Role::Student)
        .await
        .unwrap_err();

    assert_eq!(err.status.as_u16(), 400);
}

#[tokio::test]
async fn test_create_user_validates_input() {
    let store = MemoryCredentialStore::default();

    assert!(create_user(&store, "   ", "password1", Role::Admin).await.is_err());
    assert!(create_user(&store, "root", "short", Role::Admin).await.is_err());
}
