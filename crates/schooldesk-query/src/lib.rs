//! # SchoolDesk Query
//!
//! Translation of list-page URL parameters into structured, role-scoped
//! query descriptors.
//!
//! This crate provides:
//!
//! - [`filter`]: [`FilterExpression`] and the facet/search builders
//! - [`sort`]: [`SortExpression`] and [`apply_sorting`]
//! - [`entity`]: [`EntityKind`], the record types and their list settings
//! - [`scope`]: [`RoleScopeResolver`], the mandatory per-role visibility filter
//! - [`assembler`]: [`QueryOptionsAssembler`], which produces a [`QueryDescriptor`]
//! - [`store`]: the [`RecordStore`] persistence contract
//! - `eval` (feature `test-utils`): evaluation of expressions against JSON
//!   records, for in-memory stores in tests
//!
//! Nothing here performs I/O. A descriptor is handed to a [`RecordStore`]
//! implementation which executes it.
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_query::{EntityKind, QueryOptionsAssembler, RoleScopeResolver};
//!
//! let base = RoleScopeResolver::base_query(session.role, EntityKind::Students, &session.sub);
//! let descriptor = QueryOptionsAssembler::for_entity(EntityKind::Students).assemble(&params, base);
//! let rows = store.find(EntityKind::Students, &descriptor).await?;
//! ```

pub mod assembler;
pub mod entity;
#[cfg(any(test, feature = "test-utils"))]
pub mod eval;
pub mod filter;
pub mod scope;
pub mod sort;
pub mod store;

// Re-export commonly used types at crate root
pub use assembler::{BaseQuery, QueryDescriptor, QueryOptionsAssembler, RESERVED_PARAMS};
pub use entity::{EntityKind, ListConfig, ParseEntityError};
pub use filter::{
    FilterExpression, FilterOption, NULL_SENTINEL, build_condition, is_valid_field_path,
    parse_values, search_condition,
};
pub use scope::RoleScopeResolver;
pub use sort::{NestedOrder, SortDirection, SortExpression, apply_sorting};
pub use store::{Record, RecordStore};
