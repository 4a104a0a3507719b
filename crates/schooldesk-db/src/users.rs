use anyhow::Context;
use async_trait::async_trait;
use schooldesk_core::{AppError, Role};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A stored login. `password_hash` is a bcrypt hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password: String,
    role: String,
}

impl TryFrom<UserRow> for UserCredentials {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .context("Stored user has an unknown role")
            .map_err(AppError::internal)?;

        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password,
            role,
        })
    }
}

/// Lookup of sign-in credentials. A username may exist once per role.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<UserCredentials>, AppError>;

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<UserCredentials, AppError>;
}

#[derive(Clone)]
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_user(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, role
            FROM users
            WHERE username = $1 AND role = $2
            "#,
        )
        .bind(username)
        .bind(role.as_str())
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user")
        .map_err(AppError::database)?;

        row.map(UserCredentials::try_from).transpose()
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<UserCredentials, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        UserCredentials::try_from(row)
    }
}
