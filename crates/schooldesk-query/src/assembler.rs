//! Query descriptor assembly.
//!
//! Combines the caller's base query (role scope plus any fixed conditions)
//! with the facet filters, search and sort found in the URL, and with the
//! page offset. Pure: no I/O happens here.

use std::collections::HashMap;

use schooldesk_core::pagination::{PAGE_SIZE, parse_page};

use crate::entity::EntityKind;
use crate::filter::{
    FilterExpression, build_condition, is_valid_field_path, parse_values, search_condition,
};
use crate::sort::{SortExpression, apply_sorting};

pub const PAGE_PARAM: &str = "page";
pub const SORT_FIELD_PARAM: &str = "sortField";
pub const SORT_ORDER_PARAM: &str = "sortOrder";
pub const SEARCH_PARAM: &str = "search";

/// Query parameters that are never treated as facet filters.
pub const RESERVED_PARAMS: [&str; 4] =
    [PAGE_PARAM, SORT_FIELD_PARAM, SORT_ORDER_PARAM, SEARCH_PARAM];

/// Handler-supplied starting point of a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseQuery {
    pub where_clause: FilterExpression,
}

impl BaseQuery {
    pub fn new(where_clause: FilterExpression) -> Self {
        Self { where_clause }
    }

    /// Adds a fixed handler condition on top of the existing one.
    pub fn with_condition(self, condition: FilterExpression) -> Self {
        Self::new(self.where_clause.and(condition))
    }
}

/// Final, executable description of a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub where_clause: FilterExpression,
    pub order_by: Option<SortExpression>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct QueryOptionsAssembler {
    page_size: i64,
    search_fields: Vec<&'static str>,
    /// URL key to record path. `None` accepts any well-formed key as-is.
    filter_fields: Option<Vec<(&'static str, &'static str)>>,
}

impl QueryOptionsAssembler {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size: page_size.max(1),
            search_fields: Vec::new(),
            filter_fields: None,
        }
    }

    /// Assembler configured with the entity's search fields and facet
    /// allowlist and the shared page size.
    pub fn for_entity(entity: EntityKind) -> Self {
        let config = entity.list_config();
        Self::new(PAGE_SIZE)
            .search_fields(config.search_fields)
            .filter_fields(config.filter_fields)
    }

    pub fn search_fields(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn filter_fields(mut self, fields: &[(&'static str, &'static str)]) -> Self {
        self.filter_fields = Some(fields.to_vec());
        self
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Record path for facet key `key`, or `None` when the key is not
    /// accepted. Unaccepted keys are skipped, never reported.
    fn facet_path<'a>(&self, key: &'a str) -> Option<&'a str> {
        match &self.filter_fields {
            Some(allowed) => allowed
                .iter()
                .find(|(url_key, _)| *url_key == key)
                .map(|(_, path)| *path),
            None => is_valid_field_path(key).then_some(key),
        }
    }

    pub fn assemble(
        &self,
        raw_params: &HashMap<String, String>,
        base: BaseQuery,
    ) -> QueryDescriptor {
        let param = |name: &str| raw_params.get(name).map(String::as_str);

        // Sorted so the resulting expression does not depend on map order.
        let mut facet_keys: Vec<&String> = raw_params
            .keys()
            .filter(|key| !RESERVED_PARAMS.contains(&key.as_str()))
            .collect();
        facet_keys.sort();

        let mut conditions = vec![base.where_clause];
        for key in facet_keys {
            let Some(path) = self.facet_path(key) else {
                tracing::debug!(key = %key, "ignoring unknown filter parameter");
                continue;
            };
            let values = parse_values(&raw_params[key]);
            if values.is_empty() {
                continue;
            }
            conditions.push(build_condition(path, &values));
        }

        if let Some(term) = param(SEARCH_PARAM) {
            conditions.push(search_condition(&self.search_fields, term));
        }

        let page = parse_page(param(PAGE_PARAM));

        QueryDescriptor {
            where_clause: FilterExpression::all(conditions),
            order_by: apply_sorting(param(SORT_FIELD_PARAM), param(SORT_ORDER_PARAM)),
            limit: self.page_size,
            // Saturates so an absurd page number is just an empty page.
            offset: self.page_size.saturating_mul(page - 1),
        }
    }
}

impl Default for QueryOptionsAssembler {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
