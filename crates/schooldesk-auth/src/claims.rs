//! Session claims carried inside a signed token.

use chrono::Utc;
use schooldesk_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Decoded identity and role of a signed-in caller.
///
/// Sessions are never stored server-side; the signed token held in the
/// `auth-token` cookie is the only copy.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `username`: Login name
/// - `role`: The single dashboard role of the user
/// - `iat`: Issued-at timestamp (Unix seconds)
/// - `exp`: Expiry timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Session {
    /// Stamps a new session issued now and valid for `ttl_secs`.
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        ttl_secs: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.into(),
            username: username.into(),
            role,
            iat: now,
            exp: now + ttl_secs,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// A session is valid strictly before its expiry instant.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serialize() {
        let session = Session {
            sub: "user-123".to_string(),
            username: "jdoe".to_string(),
            role: Role::Teacher,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let serialized = serde_json::to_string(&session).unwrap();
        assert!(serialized.contains(r#""sub":"user-123""#));
        assert!(serialized.contains(r#""role":"teacher""#));
    }

    #[test]
    fn test_session_deserialize_rejects_unknown_role() {
        let json = r#"{"sub":"1","username":"x","role":"janitor","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn test_session_deserialize_requires_username() {
        let json = r#"{"sub":"1","role":"admin","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn test_new_session_expiry() {
        let session = Session::new("7", "admin", Role::Admin, 60);
        assert_eq!(session.exp - session.iat, 60);
        assert!(!session.is_expired_at(session.iat));
        assert!(session.is_expired_at(session.exp));
        assert!(session.is_expired_at(session.exp + 1));
    }
}
