//! # SchoolDesk DB
//!
//! PostgreSQL persistence for the SchoolDesk API.
//!
//! - [`init_db_pool`] / [`run_migrations`]: pool creation and schema set-up
//! - [`sql`]: rendering of filter and sort expressions into SQL
//! - [`records`]: [`PgRecordStore`], the JSONB-backed [`RecordStore`](schooldesk_query::RecordStore)
//! - [`users`]: [`CredentialStore`] and its PostgreSQL implementation
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_config::DatabaseConfig;
//! use schooldesk_db::{PgRecordStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgRecordStore::new(pool.clone());
//! ```

pub mod records;
pub mod sql;
pub mod users;

use schooldesk_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use records::PgRecordStore;
pub use sqlx::PgPool;
pub use users::{CredentialStore, PgCredentialStore, UserCredentials};

/// Creates the connection pool. Called once at start-up; the pool is cheap
/// to clone into application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
