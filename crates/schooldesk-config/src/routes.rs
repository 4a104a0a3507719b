//! Route access table override.
//!
//! By default the built-in dashboard table is used. Setting
//! `ROUTE_ACCESS_FILE` to a JSON file replaces it:
//!
//! ```json
//! [
//!   { "pattern": "/admin(.*)", "roles": ["admin"] },
//!   { "pattern": "/list/students", "roles": ["admin", "teacher"] }
//! ]
//! ```
//!
//! Entries keep their file order; the first matching pattern wins.

use std::env;

use schooldesk_core::Role;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAccessEntryConfig {
    pub pattern: String,
    pub roles: Vec<Role>,
}

#[derive(Clone, Debug, Default)]
pub struct RouteAccessConfig {
    /// `None` selects the built-in table.
    pub entries: Option<Vec<RouteAccessEntryConfig>>,
}

impl RouteAccessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("ROUTE_ACCESS_FILE") {
            Ok(path) if !path.trim().is_empty() => {
                let raw = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::RouteFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                Self::from_json(&path, &raw)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(path: &str, raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<RouteAccessEntryConfig> =
            serde_json::from_str(raw).map_err(|source| ConfigError::RouteFileFormat {
                path: path.to_string(),
                source,
            })?;
        Ok(Self {
            entries: Some(entries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_order() {
        let raw = r#"[
            {"pattern": "/admin(.*)", "roles": ["admin"]},
            {"pattern": "/list/exams", "roles": ["admin", "teacher", "student", "parent"]}
        ]"#;
        let config = RouteAccessConfig::from_json("routes.json", raw).unwrap();
        let entries = config.entries.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pattern, "/admin(.*)");
        assert_eq!(entries[1].roles.len(), 4);
    }

    #[test]
    fn test_from_json_rejects_unknown_role() {
        let raw = r#"[{"pattern": "/x", "roles": ["janitor"]}]"#;
        let result = RouteAccessConfig::from_json("routes.json", raw);
        assert!(matches!(result, Err(ConfigError::RouteFileFormat { .. })));
    }

    #[test]
    fn test_default_uses_builtin_table() {
        assert!(RouteAccessConfig::default().entries.is_none());
    }
}
