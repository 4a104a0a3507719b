//! # SchoolDesk Core
//!
//! Core types, errors, and utilities for the SchoolDesk API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: The shared page size, page parsing, and response metadata
//! - [`role`]: The four dashboard roles and their landing pages
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_core::{AppError, Role, pagination};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Record not found"));
//! let role: Role = "teacher".parse()?;
//! assert_eq!(role.home_path(), "/teacher");
//! assert_eq!(pagination::parse_page(Some("abc")), 1);
//! ```

pub mod errors;
pub mod pagination;
pub mod role;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PAGE_SIZE, PaginationMeta};
pub use role::{ParseRoleError, Role};
