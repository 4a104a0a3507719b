//! Filter expressions and the facet filter builder.
//!
//! A facet filter arrives as `field=v1,v2,...`. The literal `null` is a
//! sentinel meaning "field is unset". Field names are dotted paths; a path
//! that crosses a to-many relation matches when some related record matches.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Filter value meaning "the field has no value".
pub const NULL_SENTINEL: &str = "null";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterExpression {
    /// No restriction.
    #[default]
    Empty,
    Equals { field: String, value: String },
    IsNull { field: String },
    /// Case-insensitive "contains" across several fields; any field may match.
    TextSearch { fields: Vec<String>, term: String },
    And(Vec<FilterExpression>),
    Or(Vec<FilterExpression>),
}

impl FilterExpression {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpression::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        FilterExpression::IsNull {
            field: field.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterExpression::Empty)
    }

    /// Conjunction of `parts`. `Empty` parts are dropped and nested `And`s
    /// are flattened.
    pub fn all<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = FilterExpression>,
    {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                FilterExpression::Empty => {}
                FilterExpression::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::collapse(flat, FilterExpression::And)
    }

    /// Disjunction of `parts`. `Empty` parts are dropped and nested `Or`s
    /// are flattened.
    pub fn any<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = FilterExpression>,
    {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                FilterExpression::Empty => {}
                FilterExpression::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::collapse(flat, FilterExpression::Or)
    }

    pub fn and(self, other: FilterExpression) -> Self {
        Self::all([self, other])
    }

    pub fn or(self, other: FilterExpression) -> Self {
        Self::any([self, other])
    }

    fn collapse(
        mut parts: Vec<FilterExpression>,
        wrap: fn(Vec<FilterExpression>) -> FilterExpression,
    ) -> Self {
        match parts.len() {
            0 => FilterExpression::Empty,
            1 => parts.remove(0),
            _ => wrap(parts),
        }
    }
}

/// One selectable facet value shown next to a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
    pub field: String,
}

/// Splits a comma-joined multi-select value, trimming entries and dropping
/// empty ones.
pub fn parse_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the condition for one facet field.
///
/// Every value becomes its own equality branch rather than a set-membership
/// test, so facet conditions compose with other `Or` branches uniformly.
pub fn build_condition(field: &str, values: &[String]) -> FilterExpression {
    let mut has_null = false;
    let mut others: Vec<&str> = Vec::new();
    for value in values {
        if value == NULL_SENTINEL {
            has_null = true;
        } else if !others.contains(&value.as_str()) {
            others.push(value);
        }
    }

    let equals = others
        .into_iter()
        .map(|value| FilterExpression::equals(field, value));

    if has_null {
        FilterExpression::any(std::iter::once(FilterExpression::is_null(field)).chain(equals))
    } else {
        FilterExpression::any(equals)
    }
}

/// Free-text search across the caller-declared `fields`.
pub fn search_condition(fields: &[&str], term: &str) -> FilterExpression {
    let term = term.trim();
    let fields: Vec<String> = fields
        .iter()
        .filter(|field| is_valid_field_path(field))
        .map(|field| field.to_string())
        .collect();

    if term.is_empty() || fields.is_empty() {
        return FilterExpression::Empty;
    }

    FilterExpression::TextSearch {
        fields,
        term: term.to_string(),
    }
}

/// A field path is one or more `[A-Za-z0-9_]+` segments joined by dots.
pub fn is_valid_field_path(field: &str) -> bool {
    !field.is_empty()
        && field.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
