//! Persistence contract.
//!
//! The query layer hands descriptors to a [`RecordStore`] and never looks
//! at how they are executed. Records are JSON documents keyed by entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schooldesk_core::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::assembler::QueryDescriptor;
use crate::entity::EntityKind;
use crate::filter::FilterExpression;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    pub id: Uuid,
    #[schema(value_type = Object)]
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `query.where_clause`, ordered and paginated.
    async fn find(
        &self,
        entity: EntityKind,
        query: &QueryDescriptor,
    ) -> Result<Vec<Record>, AppError>;

    async fn count(&self, entity: EntityKind, filter: &FilterExpression) -> Result<i64, AppError>;

    /// Distinct non-null text values of `field` among matching records,
    /// sorted ascending. Used to offer facet choices.
    async fn distinct_values(
        &self,
        entity: EntityKind,
        field: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<String>, AppError>;

    async fn create(&self, entity: EntityKind, data: Value) -> Result<Record, AppError>;

    /// Replaces the document; `None` if no such record exists.
    async fn update(
        &self,
        entity: EntityKind,
        id: Uuid,
        data: Value,
    ) -> Result<Option<Record>, AppError>;

    /// `true` if a record was deleted.
    async fn delete(&self, entity: EntityKind, id: Uuid) -> Result<bool, AppError>;
}
