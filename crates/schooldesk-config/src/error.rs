use thiserror::Error;

/// Configuration problems detected at start-up. All of them are fatal: the
/// server refuses to start rather than serving requests half-configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to read route access file {path}: {source}")]
    RouteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse route access file {path}: {source}")]
    RouteFileFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
