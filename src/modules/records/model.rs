use schooldesk_core::PaginationMeta;
use schooldesk_query::Record;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a dashboard list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    pub data: Vec<Record>,
    pub meta: PaginationMeta,
}
