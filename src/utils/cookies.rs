//! `Set-Cookie` values for the session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;
use schooldesk_config::CookieConfig;

fn build(config: &CookieConfig, value: String, max_age: Duration) -> String {
    Cookie::build((config.name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(max_age)
        .build()
        .to_string()
}

pub fn session_cookie(config: &CookieConfig, token: &str) -> String {
    build(
        config,
        token.to_owned(),
        Duration::seconds(config.max_age_secs),
    )
}

/// Expires the session cookie immediately.
pub fn removal_cookie(config: &CookieConfig) -> String {
    build(config, String::new(), Duration::ZERO)
}
