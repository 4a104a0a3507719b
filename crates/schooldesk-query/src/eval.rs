//! Evaluation of filter and sort expressions against JSON records.
//!
//! Path semantics match the PostgreSQL store's lax JSON path mode: a
//! segment applied to an array applies to each element, so a path through
//! a to-many relation yields every related value, and a path that runs off
//! the document yields nothing. Only scalar values take part in
//! comparisons; they are compared by their text form.

use std::cmp::Ordering;

use serde_json::Value;

use crate::filter::FilterExpression;
use crate::sort::{SortDirection, SortExpression};

/// Every value reached by `path` inside `document`, with arrays unwrapped.
pub fn values_at<'a>(document: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![document];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => next.extend(map.get(segment)),
                Value::Array(items) => next.extend(
                    items
                        .iter()
                        .filter_map(|item| item.as_object())
                        .filter_map(|map| map.get(segment)),
                ),
                _ => {}
            }
        }
        current = next;
    }

    current
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect()
}

/// Text form of a scalar; `None` for null, objects and arrays.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

pub fn matches(expression: &FilterExpression, document: &Value) -> bool {
    match expression {
        FilterExpression::Empty => true,
        FilterExpression::Equals { field, value } => values_at(document, field)
            .into_iter()
            .filter_map(scalar_text)
            .any(|text| text == *value),
        FilterExpression::IsNull { field } => values_at(document, field)
            .into_iter()
            .all(Value::is_null),
        FilterExpression::TextSearch { fields, term } => {
            let needle = term.to_lowercase();
            fields.iter().any(|field| {
                values_at(document, field)
                    .into_iter()
                    .filter_map(scalar_text)
                    .any(|text| text.to_lowercase().contains(&needle))
            })
        }
        FilterExpression::And(parts) => parts.iter().all(|part| matches(part, document)),
        FilterExpression::Or(parts) => parts.iter().any(|part| matches(part, document)),
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
enum SortKey {
    Count(usize),
    Text(String),
}

fn sort_key(sort: &SortExpression, document: &Value) -> Option<SortKey> {
    match sort {
        SortExpression::ByRelationCount { relation, .. } => Some(SortKey::Count(
            document
                .get(relation)
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        )),
        SortExpression::ByField { .. } | SortExpression::ByNestedField { .. } => {
            values_at(document, &sort.path().join("."))
                .into_iter()
                .find_map(scalar_text)
                .map(SortKey::Text)
        }
    }
}

/// Orders two documents by `sort`. Documents without a value sort last in
/// either direction.
pub fn compare(sort: &SortExpression, left: &Value, right: &Value) -> Ordering {
    match (sort_key(sort, left), sort_key(sort, right)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match sort.direction() {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
