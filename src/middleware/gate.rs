use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use schooldesk_auth::GateDecision;
use schooldesk_observability::track_gate_decision;
use tracing::debug;

use crate::state::AppState;
use crate::utils::cookies::removal_cookie;

/// Runs [`AccessGate::decide`](schooldesk_auth::AccessGate::decide) for the
/// request path and either forwards the request or answers with a redirect.
pub async fn access_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    let token = jar
        .get(state.cookie_config.name)
        .map(|cookie| cookie.value().to_owned());

    let decision = state.gate.decide(&path, token.as_deref());
    let outcome = decision.outcome();
    track_gate_decision(outcome);

    match decision {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Redirect { to, clear_cookie } => {
            debug!(path = %path, to = %to, outcome, clear_cookie, "Gate redirect");
            let clear = clear_cookie
                .then(|| [(header::SET_COOKIE, removal_cookie(&state.cookie_config))]);
            (clear, Redirect::to(&to)).into_response()
        }
    }
}
