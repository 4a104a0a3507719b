//! SchoolDesk Observability
//!
//! - Structured logging via `tracing-subscriber`, compact or JSON, with an
//!   optional daily rolling file
//! - Request logging middleware with a per-request id
//! - Prometheus metrics: HTTP latency, gate decisions, logins
//!
//! Everything except [`LoggingConfig`] is compiled only with the default
//! `observability` feature; without it the same names exist as no-ops.
//!
//! # Examples
//!
//! ```no_run
//! use schooldesk_observability::{LoggingConfig, init_logging, init_metrics};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_logging(&LoggingConfig::from_env())?;
//!     let _handle = init_metrics(true)?;
//!     Ok(())
//! }
//! ```

pub mod config;

pub use config::{LogFormat, LoggingConfig};

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_logging, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, is_metrics_enabled, metrics_app, metrics_middleware, track_gate_decision,
    track_login, track_token_issued,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    use crate::LoggingConfig;

    /// Placeholder so callers can name the handle type either way.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn init_logging(_config: &LoggingConfig) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_metrics(_enabled: bool) -> anyhow::Result<Option<PrometheusHandle>> {
        Ok(None)
    }

    pub fn is_metrics_enabled() -> bool {
        false
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_gate_decision(_outcome: &'static str) {}
    pub fn track_login(_outcome: &'static str, _role: &str) {}
    pub fn track_token_issued() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
