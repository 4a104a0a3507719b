//! Dashboard roles.
//!
//! Every session carries exactly one [`Role`]. Admin is the only privileged
//! role: it is never restricted by data-visibility scoping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::Parent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    /// Landing page for the role, used as the redirect target whenever the
    /// caller is signed in but not allowed where they tried to go.
    pub fn home_path(&self) -> String {
        format!("/{}", self.as_str())
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_from_string() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert_eq!("parent".parse::<Role>(), Ok(Role::Parent));
        assert!("system_admin".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_home_path() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::Parent.home_path(), "/parent");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, r#""teacher""#);
        let role: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_only_admin_is_privileged() {
        for role in Role::ALL {
            assert_eq!(role.is_privileged(), role == Role::Admin);
        }
    }
}
