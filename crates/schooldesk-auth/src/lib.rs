//! # SchoolDesk Auth
//!
//! Authentication and navigation access control for the SchoolDesk API.
//!
//! This crate provides:
//!
//! - [`claims`]: The [`Session`] carried inside a signed token
//! - [`token`]: [`TokenService`] for issuing and verifying session tokens
//! - [`routes`]: [`RouteAccessTable`], the ordered path-pattern to roles map
//! - [`gate`]: [`AccessGate`], the per-navigation allow/redirect decision
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_auth::{AccessGate, GateDecision, RouteAccessTable, Session, TokenService};
//! use schooldesk_core::Role;
//!
//! let tokens = TokenService::new(&jwt_config);
//! let token = tokens.issue(&Session::new("42", "jdoe", Role::Teacher, 86_400))?;
//!
//! let gate = AccessGate::new(tokens, RouteAccessTable::default());
//! assert_eq!(gate.decide("/list/students", Some(&token)), GateDecision::Allow);
//! ```

pub mod claims;
pub mod gate;
pub mod routes;
pub mod token;

// Re-export commonly used types at crate root
pub use claims::Session;
pub use gate::{AccessGate, GateDecision, HOME_PATH, SIGN_IN_PATH};
pub use routes::{RouteAccessEntry, RouteAccessTable};
pub use token::TokenService;
