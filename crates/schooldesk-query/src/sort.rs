//! Sort expressions.
//!
//! One sort key at a time. The key is a plain field, a dotted path into a
//! related record, or `_count.<relation>` to order by the number of related
//! records.

use std::fmt;

use crate::filter::is_valid_field_path;

const RELATION_COUNT_PREFIX: &str = "_count.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any case) sorts descending; anything else, including no
    /// value, sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(order) if order.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortExpression {
    ByField {
        field: String,
        direction: SortDirection,
    },
    ByNestedField {
        path: Vec<String>,
        direction: SortDirection,
    },
    ByRelationCount {
        relation: String,
        direction: SortDirection,
    },
}

/// Nested order object: the innermost segment carries the direction and
/// every enclosing segment wraps the one after it, e.g. `department.name`
/// becomes `{ department: { name: asc } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedOrder {
    Direction(SortDirection),
    Field {
        segment: String,
        inner: Box<NestedOrder>,
    },
}

impl SortExpression {
    pub fn direction(&self) -> SortDirection {
        match self {
            SortExpression::ByField { direction, .. }
            | SortExpression::ByNestedField { direction, .. }
            | SortExpression::ByRelationCount { direction, .. } => *direction,
        }
    }

    /// Field path segments the expression orders by.
    pub fn path(&self) -> Vec<&str> {
        match self {
            SortExpression::ByField { field, .. } => vec![field.as_str()],
            SortExpression::ByNestedField { path, .. } => path.iter().map(String::as_str).collect(),
            SortExpression::ByRelationCount { relation, .. } => vec![relation.as_str()],
        }
    }

    /// The right-to-left nested form of the ordering.
    pub fn to_nested(&self) -> NestedOrder {
        self.path()
            .into_iter()
            .rev()
            .fold(NestedOrder::Direction(self.direction()), |inner, segment| {
                NestedOrder::Field {
                    segment: segment.to_string(),
                    inner: Box::new(inner),
                }
            })
    }
}

/// Resolves the `sortField` / `sortOrder` pair. Returns `None` when no field
/// is given or the field is not a valid path, leaving the store's default
/// order in place.
pub fn apply_sorting(field: Option<&str>, order: Option<&str>) -> Option<SortExpression> {
    let field = field.map(str::trim).filter(|f| !f.is_empty())?;
    let direction = SortDirection::parse(order);

    if let Some(relation) = field.strip_prefix(RELATION_COUNT_PREFIX) {
        if !is_valid_field_path(relation) || relation.contains('.') {
            tracing::debug!(field, "ignoring malformed relation count sort");
            return None;
        }
        return Some(SortExpression::ByRelationCount {
            relation: relation.to_string(),
            direction,
        });
    }

    if !is_valid_field_path(field) {
        tracing::debug!(field, "ignoring malformed sort field");
        return None;
    }

    if field.contains('.') {
        return Some(SortExpression::ByNestedField {
            path: field.split('.').map(str::to_string).collect(),
            direction,
        });
    }

    Some(SortExpression::ByField {
        field: field.to_string(),
        direction,
    })
}
