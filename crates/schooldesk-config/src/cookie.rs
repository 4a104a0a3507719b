use std::env;

use crate::JwtConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Attributes of the session cookie. The cookie is always `HttpOnly`,
/// `SameSite=Lax` and scoped to `/`; only `Secure` and the lifetime vary.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: &'static str,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl CookieConfig {
    pub fn from_env(jwt_config: &JwtConfig) -> Self {
        Self::from_lookup(jwt_config, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(jwt_config: &JwtConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secure = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            name: SESSION_COOKIE_NAME,
            secure,
            max_age_secs: jwt_config.session_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "secret".to_string(),
            session_ttl_secs: 86_400,
        }
    }

    #[test]
    fn test_secure_only_in_production() {
        let config = CookieConfig::from_lookup(&jwt(), |_| Some("production".to_string()));
        assert!(config.secure);

        let config = CookieConfig::from_lookup(&jwt(), |_| Some("development".to_string()));
        assert!(!config.secure);

        let config = CookieConfig::from_lookup(&jwt(), |_| None);
        assert!(!config.secure);
    }

    #[test]
    fn test_max_age_follows_session_ttl() {
        let config = CookieConfig::from_lookup(&jwt(), |_| None);
        assert_eq!(config.max_age_secs, 86_400);
        assert_eq!(config.name, "auth-token");
    }
}
