use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use schooldesk_core::AppError;
use schooldesk_query::{EntityKind, FilterOption, Record};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthSession;
use crate::modules::auth::model::ErrorResponse;
use crate::modules::records::model::ListResponse;
use crate::modules::records::service::RecordService;
use crate::state::AppState;

fn parse_entity(raw: &str) -> Result<EntityKind, AppError> {
    raw.parse::<EntityKind>().map_err(AppError::not_found)
}

/// One page of a dashboard list
///
/// Query parameters other than `page`, `search`, `sortField` and `sortOrder`
/// are facet filters; comma-separated values are alternatives.
#[utoipa::path(
    get,
    path = "/api/list/{entity}",
    params(
        ("entity" = String, Path, description = "Entity name, e.g. `students`"),
        ("page" = Option<i64>, Query, description = "1-indexed page number"),
        ("search" = Option<String>, Query, description = "Free-text search term"),
        ("sortField" = Option<String>, Query, description = "Dotted field path or `_count.<relation>`"),
        ("sortOrder" = Option<String>, Query, description = "`asc` or `desc`")
    ),
    responses(
        (status = 200, description = "Records visible to the caller", body = ListResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Role may not view this list", body = ErrorResponse),
        (status = 404, description = "Unknown entity", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth, params), fields(role = %auth.role()))]
pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListResponse>, AppError> {
    let entity = parse_entity(&entity)?;
    auth.require_list_access(&state, entity)?;

    let response = RecordService::list(state.store.as_ref(), &auth.0, entity, &params).await?;
    Ok(Json(response))
}

/// Selectable values for one facet filter
#[utoipa::path(
    get,
    path = "/api/list/{entity}/facets/{field}",
    params(
        ("entity" = String, Path, description = "Entity name"),
        ("field" = String, Path, description = "Facet key, e.g. `classId`")
    ),
    responses(
        (status = 200, description = "Distinct values visible to the caller", body = Vec<FilterOption>),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Role may not view this list", body = ErrorResponse),
        (status = 404, description = "Unknown entity or facet", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth), fields(role = %auth.role()))]
pub async fn list_facet_options(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, field)): Path<(String, String)>,
) -> Result<Json<Vec<FilterOption>>, AppError> {
    let entity = parse_entity(&entity)?;
    auth.require_list_access(&state, entity)?;

    let options =
        RecordService::facet_options(state.store.as_ref(), &auth.0, entity, &field).await?;
    Ok(Json(options))
}

#[utoipa::path(
    post,
    path = "/api/list/{entity}",
    params(("entity" = String, Path, description = "Entity name")),
    request_body(content = Object, description = "Record document"),
    responses(
        (status = 201, description = "Record created", body = Record),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth, data))]
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(entity): Path<String>,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let entity = parse_entity(&entity)?;
    auth.require_admin()?;

    let record = RecordService::create(state.store.as_ref(), entity, data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/api/list/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity name"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    request_body(content = Object, description = "Replacement document"),
    responses(
        (status = 200, description = "Record updated", body = Record),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth, data))]
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, id)): Path<(String, Uuid)>,
    Json(data): Json<Value>,
) -> Result<Json<Record>, AppError> {
    let entity = parse_entity(&entity)?;
    auth.require_admin()?;

    let record = RecordService::update(state.store.as_ref(), entity, id, data).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/list/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity name"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth))]
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let entity = parse_entity(&entity)?;
    auth.require_admin()?;

    RecordService::delete(state.store.as_ref(), entity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
