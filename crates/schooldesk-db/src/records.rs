use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schooldesk_core::AppError;
use schooldesk_query::{EntityKind, FilterExpression, QueryDescriptor, Record, RecordStore};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::sql::{json_path, push_filter, push_order_by};

/// Upper bound on facet choices returned for a single field.
const MAX_DISTINCT_VALUES: i64 = 500;

#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            id: row.id,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// [`RecordStore`] over the `records` table.
#[derive(Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn scoped<'a>(
    prefix: &str,
    entity: EntityKind,
    filter: &FilterExpression,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(prefix);
    builder.push(" WHERE entity = ");
    builder.push_bind(entity.as_str());
    builder.push(" AND ");
    push_filter(&mut builder, filter);
    builder
}

/// SQL for [`RecordStore::find`].
pub fn find_query<'a>(entity: EntityKind, query: &QueryDescriptor) -> QueryBuilder<'a, Postgres> {
    let mut builder = scoped(
        "SELECT id, data, created_at, updated_at FROM records",
        entity,
        &query.where_clause,
    );
    push_order_by(&mut builder, query.order_by.as_ref());
    builder.push(" LIMIT ");
    builder.push_bind(query.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.offset);
    builder
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[instrument(skip(self, query), fields(entity = %entity))]
    async fn find(
        &self,
        entity: EntityKind,
        query: &QueryDescriptor,
    ) -> Result<Vec<Record>, AppError> {
        let rows = find_query(entity, query)
            .build_query_as::<RecordRow>()
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch records")
            .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    #[instrument(skip(self, filter), fields(entity = %entity))]
    async fn count(&self, entity: EntityKind, filter: &FilterExpression) -> Result<i64, AppError> {
        let total: i64 = scoped("SELECT COUNT(*) FROM records", entity, filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await
            .context("Failed to count records")
            .map_err(AppError::database)?;

        Ok(total)
    }

    #[instrument(skip(self, filter), fields(entity = %entity))]
    async fn distinct_values(
        &self,
        entity: EntityKind,
        field: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<String>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT DISTINCT f.v #>> '{}' AS choice FROM records, jsonb_path_query(records.data, ",
        );
        builder.push_bind(json_path(field));
        builder.push("::jsonpath) AS f(v) WHERE records.entity = ");
        builder.push_bind(entity.as_str());
        builder.push(" AND jsonb_typeof(f.v) IN ('string', 'number', 'boolean') AND ");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY choice LIMIT ");
        builder.push_bind(MAX_DISTINCT_VALUES);

        let values = builder
            .build_query_scalar::<String>()
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch distinct values")
            .map_err(AppError::database)?;

        Ok(values)
    }

    async fn create(&self, entity: EntityKind, data: Value) -> Result<Record, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            INSERT INTO records (entity, data)
            VALUES ($1, $2)
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(entity.as_str())
        .bind(data)
        .fetch_one(&self.db)
        .await
        .context("Failed to insert record")
        .map_err(AppError::database)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        entity: EntityKind,
        id: Uuid,
        data: Value,
    ) -> Result<Option<Record>, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            UPDATE records
            SET data = $3, updated_at = NOW()
            WHERE entity = $1 AND id = $2
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(entity.as_str())
        .bind(id)
        .bind(data)
        .fetch_optional(&self.db)
        .await
        .context("Failed to update record")
        .map_err(AppError::database)?;

        Ok(row.map(Record::from))
    }

    async fn delete(&self, entity: EntityKind, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM records WHERE entity = $1 AND id = $2")
            .bind(entity.as_str())
            .bind(id)
            .execute(&self.db)
            .await
            .context("Failed to delete record")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooldesk_core::Role;
    use schooldesk_query::{QueryOptionsAssembler, RoleScopeResolver};
    use std::collections::HashMap;

    #[test]
    fn test_find_query_scopes_by_entity_and_paginates() {
        let query = QueryDescriptor {
            where_clause: FilterExpression::Empty,
            order_by: None,
            limit: 10,
            offset: 20,
        };
        let builder = find_query(EntityKind::Students, &query);
        assert_eq!(
            builder.sql(),
            "SELECT id, data, created_at, updated_at FROM records WHERE entity = $1 AND TRUE \
             ORDER BY created_at ASC, id ASC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_find_query_for_assembled_descriptor() {
        let params: HashMap<String, String> = [
            ("classId".to_string(), "5".to_string()),
            ("search".to_string(), "math".to_string()),
            ("sortField".to_string(), "title".to_string()),
        ]
        .into_iter()
        .collect();
        let base = RoleScopeResolver::base_query(Role::Teacher, EntityKind::Exams, "T");
        let query = QueryOptionsAssembler::for_entity(EntityKind::Exams).assemble(&params, base);
        let builder = find_query(EntityKind::Exams, &query);
        let sql = builder.sql();

        assert!(sql.contains("WHERE entity = $1 AND ("));
        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("ORDER BY (data #>> "));
        assert!(sql.contains(" NULLS LAST, created_at ASC, id ASC LIMIT $"));
    }
}
