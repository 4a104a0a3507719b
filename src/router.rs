use axum::http::{HeaderValue, Method, Uri, header};
use axum::{Json, Router, middleware, routing::get};
use schooldesk_core::AppError;
use schooldesk_observability::{
    PrometheusHandle, logging_middleware, metrics_app, metrics_middleware,
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::middleware::gate::access_gate;
use crate::modules::auth::init_auth_router;
use crate::modules::records::init_records_router;
use crate::state::AppState;

/// Builds the application.
///
/// The access gate wraps the API and the page fallback. `/health`, the API
/// reference and `/metrics` are not dashboard pages and sit outside it.
pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let gated = Router::new()
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/list", init_records_router()),
        )
        .fallback(not_found)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), access_gate));

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(gated);

    if let Some(handle) = metrics {
        app = app.merge(metrics_app(handle));
    }

    app.layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Pages the gate let through are rendered by the frontend, not here.
async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(anyhow::anyhow!("No route for {}", uri.path()))
}
