//! Request middleware and extractors.
//!
//! - [`gate`]: the navigation gate run in front of every page request
//! - [`auth`]: the [`AuthSession`](auth::AuthSession) extractor used by API
//!   handlers, which verify the session cookie themselves
//!
//! Page requests are decided by the gate and answered with redirects. API
//! requests bypass the gate and fail with `401`/`403` JSON instead.

pub mod auth;
pub mod gate;
