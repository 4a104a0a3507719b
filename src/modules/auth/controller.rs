use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use schooldesk_auth::Session;
use schooldesk_core::AppError;
use tracing::instrument;

use crate::middleware::auth::MaybeSession;
use crate::modules::auth::model::{ErrorResponse, LoginRequest, LoginResponse, SuccessResponse};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::cookies::{removal_cookie, session_cookie};
use crate::validator::ValidatedJson;

/// Sign in and receive the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = LoginResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let (token, session) = AuthService::login(&state, dto).await?;

    let body = LoginResponse {
        success: true,
        redirect: session.role.home_path(),
    };
    Ok((
        [(header::SET_COOKIE, session_cookie(&state.cookie_config, &token))],
        Json(body),
    )
        .into_response())
}

/// Sign out by expiring the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie removed", body = SuccessResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout_user(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, removal_cookie(&state.cookie_config))],
        Json(SuccessResponse { success: true }),
    )
        .into_response()
}

/// Current session, or `null` when signed out
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "The verified session or null", body = Option<Session>)
    ),
    tag = "Authentication"
)]
pub async fn get_session(MaybeSession(session): MaybeSession) -> Json<Option<Session>> {
    Json(session)
}
