use std::collections::HashMap;

use schooldesk_auth::Session;
use schooldesk_core::{AppError, PaginationMeta};
use schooldesk_query::{
    EntityKind, FilterOption, QueryOptionsAssembler, Record, RecordStore, RoleScopeResolver,
};
use serde_json::Value;
use uuid::Uuid;

use crate::modules::records::model::ListResponse;

pub struct RecordService;

impl RecordService {
    /// One page of `entity` as seen by `session`: role scope, facets,
    /// search, sorting and pagination from `params`.
    pub async fn list(
        store: &dyn RecordStore,
        session: &Session,
        entity: EntityKind,
        params: &HashMap<String, String>,
    ) -> Result<ListResponse, AppError> {
        let base = RoleScopeResolver::base_query(session.role, entity, session.user_id());
        let query = QueryOptionsAssembler::for_entity(entity).assemble(params, base);

        let (data, total) = tokio::try_join!(
            store.find(entity, &query),
            store.count(entity, &query.where_clause)
        )?;

        Ok(ListResponse {
            data,
            meta: PaginationMeta::new(total, query.limit, query.offset),
        })
    }

    /// Choices for the facet `key`, limited to what the session may see.
    pub async fn facet_options(
        store: &dyn RecordStore,
        session: &Session,
        entity: EntityKind,
        key: &str,
    ) -> Result<Vec<FilterOption>, AppError> {
        let path = entity
            .filter_path(key)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Unknown filter {key} for {entity}")))?;
        let scope = RoleScopeResolver::scope(session.role, entity, session.user_id());

        let values = store.distinct_values(entity, path, &scope).await?;

        Ok(values
            .into_iter()
            .map(|value| FilterOption {
                label: value.clone(),
                value,
                field: key.to_string(),
            })
            .collect())
    }

    pub async fn create(
        store: &dyn RecordStore,
        entity: EntityKind,
        data: Value,
    ) -> Result<Record, AppError> {
        ensure_object(&data)?;
        store.create(entity, data).await
    }

    pub async fn update(
        store: &dyn RecordStore,
        entity: EntityKind,
        id: Uuid,
        data: Value,
    ) -> Result<Record, AppError> {
        ensure_object(&data)?;
        store
            .update(entity, id, data)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("{entity} record {id} not found")))
    }

    pub async fn delete(store: &dyn RecordStore, entity: EntityKind, id: Uuid) -> Result<(), AppError> {
        if store.delete(entity, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!(
                "{entity} record {id} not found"
            )))
        }
    }
}

fn ensure_object(data: &Value) -> Result<(), AppError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow::anyhow!(
            "Record body must be a JSON object"
        )))
    }
}
