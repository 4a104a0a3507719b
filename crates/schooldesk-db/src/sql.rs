//! Rendering of query expressions into PostgreSQL.
//!
//! Records live in a JSONB `data` column. Field paths become lax SQL/JSON
//! paths (`$."class"."lessons"."teacherId"[*]`), so a path through an array
//! matches when any element matches. Field paths are validated identifiers
//! and every value is a bound parameter.

use schooldesk_query::{FilterExpression, SortExpression};
use sqlx::{Postgres, QueryBuilder};

const SCALAR_TYPES: &str = "jsonb_typeof(p.v) IN ('string', 'number', 'boolean')";

/// SQL/JSON path selecting every value at a dotted field path.
pub fn json_path(field: &str) -> String {
    let segments: Vec<String> = field
        .split('.')
        .map(|segment| format!("\"{}\"", segment))
        .collect();
    format!("$.{}[*]", segments.join("."))
}

/// Escapes `LIKE` metacharacters so the term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_values_at(builder: &mut QueryBuilder<'_, Postgres>, field: &str) {
    builder.push("SELECT 1 FROM jsonb_path_query(data, ");
    builder.push_bind(json_path(field));
    builder.push("::jsonpath) AS p(v) WHERE ");
}

/// Appends `expression` as a boolean SQL expression.
pub fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, expression: &FilterExpression) {
    match expression {
        FilterExpression::Empty => {
            builder.push("TRUE");
        }
        FilterExpression::Equals { field, value } => {
            builder.push("EXISTS (");
            push_values_at(builder, field);
            builder.push(SCALAR_TYPES);
            builder.push(" AND p.v #>> '{}' = ");
            builder.push_bind(value.clone());
            builder.push(")");
        }
        FilterExpression::IsNull { field } => {
            builder.push("NOT EXISTS (");
            push_values_at(builder, field);
            builder.push("jsonb_typeof(p.v) <> 'null')");
        }
        FilterExpression::TextSearch { fields, term } => {
            if fields.is_empty() {
                builder.push("TRUE");
                return;
            }
            let pattern = like_pattern(term);
            builder.push("(");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push("EXISTS (");
                push_values_at(builder, field);
                builder.push(SCALAR_TYPES);
                builder.push(" AND p.v #>> '{}' ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(")");
            }
            builder.push(")");
        }
        FilterExpression::And(parts) => push_junction(builder, parts, " AND ", "TRUE"),
        FilterExpression::Or(parts) => push_junction(builder, parts, " OR ", "FALSE"),
    }
}

fn push_junction(
    builder: &mut QueryBuilder<'_, Postgres>,
    parts: &[FilterExpression],
    separator: &str,
    identity: &str,
) {
    if parts.is_empty() {
        builder.push(identity);
        return;
    }
    builder.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, part);
    }
    builder.push(")");
}

/// Appends an `ORDER BY` clause. Missing values sort last; creation order
/// breaks ties so pages are stable.
pub fn push_order_by(builder: &mut QueryBuilder<'_, Postgres>, sort: Option<&SortExpression>) {
    builder.push(" ORDER BY ");
    if let Some(sort) = sort {
        match sort {
            SortExpression::ByRelationCount { relation, .. } => {
                builder.push("jsonb_array_length(jsonb_path_query_array(data, ");
                builder.push_bind(json_path(relation));
                builder.push("::jsonpath))");
            }
            SortExpression::ByField { .. } | SortExpression::ByNestedField { .. } => {
                let path: Vec<String> = sort.path().into_iter().map(str::to_string).collect();
                builder.push("(data #>> ");
                builder.push_bind(path);
                builder.push(")");
            }
        }
        builder.push(" ");
        builder.push(sort.direction().as_sql());
        builder.push(" NULLS LAST, ");
    }
    builder.push("created_at ASC, id ASC");
}
