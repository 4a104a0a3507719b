//! # SchoolDesk Config
//!
//! Configuration types for the SchoolDesk API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Session token signing configuration (fatal when the secret is missing)
//! - [`cookie`]: Session cookie attributes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`routes`]: Optional route access table override
//! - [`server`]: Listen address and runtime environment
//!
//! Every `from_env` constructor delegates to a `from_lookup` variant that takes
//! a key lookup closure, so configuration parsing can be tested without
//! touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_config::{CookieConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?; // fails without JWT_SECRET
//! let cookie_config = CookieConfig::from_env(&jwt_config);
//! ```

pub mod cookie;
pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod routes;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::{CookieConfig, SESSION_COOKIE_NAME};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use routes::{RouteAccessConfig, RouteAccessEntryConfig};
pub use server::ServerConfig;

/// Reads an optional numeric variable: absent means `default`, present but
/// unparsable is an error rather than a silent fallback.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw })
        }
        _ => Ok(default),
    }
}
