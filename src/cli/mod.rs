//! Administrative commands backing the `schooldesk-cli` binary.

use schooldesk_core::{AppError, Role};
use schooldesk_db::{CredentialStore, UserCredentials};

use crate::utils::password::hash_password;

/// Creates a sign-in account. The same username may exist once per role.
pub async fn create_user(
    credentials: &dyn CredentialStore,
    username: &str,
    password: &str,
    role: Role,
) -> Result<UserCredentials, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("Username is required")));
    }
    if password.len() < 8 {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Password must be at least 8 characters"
        )));
    }

    if credentials.find_user(username, role).await?.is_some() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "A {role} named {username} already exists"
        )));
    }

    let hashed_password = hash_password(password)?;
    credentials.create_user(username, &hashed_password, role).await
}
