use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use schooldesk_auth::Session;
use schooldesk_core::{AppError, Role};
use schooldesk_query::EntityKind;

use crate::state::AppState;

/// Extractor that verifies the session cookie and provides the session.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl AuthSession {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }

    /// The role may open the dashboard list page of `entity`.
    pub fn require_list_access(&self, state: &AppState, entity: EntityKind) -> Result<(), AppError> {
        if state.routes().is_allowed(&entity.list_path(), self.role()) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role {} may not access {}",
                self.role(),
                entity
            )))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role() == Role::Admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin role required".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(state.cookie_config.name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::unauthorized("Missing session cookie".to_string()))?;

        let session = state
            .tokens()
            .verify(&token)
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session".to_string()))?;

        Ok(AuthSession(session))
    }
}

/// Like [`AuthSession`] but absent when there is no valid session.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = AuthSession::from_request_parts(parts, state)
            .await
            .ok()
            .map(|AuthSession(session)| session);
        Ok(MaybeSession(session))
    }
}
