use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; everything else is compact.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// Directory for the rolling JSON log file. No file when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            level: non_blank("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(non_blank("LOG_FORMAT").as_deref()),
            log_dir: non_blank("LOG_DIR").map(PathBuf::from),
        }
    }

    /// Filter directives: the app crates at `level`, noisy dependencies at warn.
    pub fn filter_directives(&self) -> String {
        format!(
            "schooldesk={level},schooldesk_auth={level},schooldesk_query={level},\
             schooldesk_db={level},tower_http=warn,hyper=warn,sqlx=warn",
            level = self.level
        )
    }
}
