use std::env;
use std::sync::Arc;

use anyhow::Context;
use schooldesk_auth::{AccessGate, RouteAccessTable, TokenService};
use schooldesk_config::{CookieConfig, CorsConfig, JwtConfig, RouteAccessConfig};
use schooldesk_db::{CredentialStore, PgCredentialStore, PgPool, PgRecordStore};
use schooldesk_query::RecordStore;

/// Shared, read-only application state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AccessGate>,
    pub store: Arc<dyn RecordStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn tokens(&self) -> &TokenService {
        self.gate.tokens()
    }

    pub fn routes(&self) -> &RouteAccessTable {
        self.gate.routes()
    }
}

/// Everything the server needs from the environment apart from the
/// database. Loaded before any connection is opened.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub routes: RouteAccessTable,
    pub cookie: CookieConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// A missing or blank `JWT_SECRET` and an unreadable route table are
    /// fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt = JwtConfig::from_lookup(&lookup)?;
        let route_config = RouteAccessConfig::from_env()?;
        let routes = RouteAccessTable::from_config(&route_config)
            .context("Invalid pattern in route access table")?;
        let cookie = CookieConfig::from_lookup(&jwt, &lookup);

        Ok(Self {
            jwt,
            routes,
            cookie,
            cors: CorsConfig::from_env(),
        })
    }
}

pub fn init_app_state(config: AppConfig, db: PgPool) -> AppState {
    AppState {
        gate: Arc::new(AccessGate::new(
            TokenService::new(&config.jwt),
            config.routes,
        )),
        store: Arc::new(PgRecordStore::new(db.clone())),
        credentials: Arc::new(PgCredentialStore::new(db)),
        cookie_config: config.cookie,
        cors_config: config.cors,
    }
}
