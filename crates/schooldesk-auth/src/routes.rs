//! Route access table.
//!
//! An ordered list of path patterns, each compiled once into an anchored
//! regex, mapped to the roles allowed to enter matching paths. Resolution
//! walks the entries in declaration order and the first match wins. A path
//! no entry matches is closed to every role.

use regex::Regex;
use schooldesk_config::{RouteAccessConfig, RouteAccessEntryConfig};
use schooldesk_core::Role;

use Role::{Admin, Parent, Student, Teacher};

const ALL_ROLES: &[Role] = &[Admin, Teacher, Student, Parent];

/// Built-in dashboard table.
const DEFAULT_ROUTES: &[(&str, &[Role])] = &[
    ("/admin(.*)", &[Admin]),
    ("/student(.*)", &[Student]),
    ("/teacher(.*)", &[Teacher]),
    ("/parent(.*)", &[Parent]),
    ("/list/teachers", &[Admin, Teacher]),
    ("/list/students", &[Admin, Teacher]),
    ("/list/parents", &[Admin, Teacher]),
    ("/list/subjects", &[Admin]),
    ("/list/classes", &[Admin, Teacher]),
    ("/list/lessons", &[Admin, Teacher]),
    ("/list/exams", ALL_ROLES),
    ("/list/assignments", ALL_ROLES),
    ("/list/results", ALL_ROLES),
    ("/list/attendance", ALL_ROLES),
    ("/list/events", ALL_ROLES),
    ("/list/announcements", ALL_ROLES),
];

#[derive(Debug, Clone)]
pub struct RouteAccessEntry {
    pattern: String,
    matcher: Regex,
    allowed_roles: Vec<Role>,
}

impl RouteAccessEntry {
    pub fn new(pattern: &str, allowed_roles: Vec<Role>) -> Result<Self, regex::Error> {
        let matcher = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            allowed_roles,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

#[derive(Debug, Clone)]
pub struct RouteAccessTable {
    entries: Vec<RouteAccessEntry>,
}

impl RouteAccessTable {
    pub fn new(entries: Vec<RouteAccessEntry>) -> Self {
        Self { entries }
    }

    /// Compiles `(pattern, roles)` pairs in order.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that is not a valid regex.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, Vec<Role>)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(pattern, roles)| RouteAccessEntry::new(pattern, roles))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    /// Builds the table from configuration, falling back to the built-in
    /// table when no override is configured.
    pub fn from_config(config: &RouteAccessConfig) -> Result<Self, regex::Error> {
        match &config.entries {
            Some(entries) => Self::from_pairs(
                entries
                    .iter()
                    .map(|RouteAccessEntryConfig { pattern, roles }| (pattern.as_str(), roles.clone())),
            ),
            None => Ok(Self::default()),
        }
    }

    /// Roles allowed on `path`, from the first matching entry. `None` when
    /// nothing matches, which denies every role.
    pub fn resolve(&self, path: &str) -> Option<&[Role]> {
        self.entries
            .iter()
            .find(|entry| entry.matches(path))
            .map(RouteAccessEntry::allowed_roles)
    }

    pub fn is_allowed(&self, path: &str, role: Role) -> bool {
        self.resolve(path)
            .is_some_and(|roles| roles.contains(&role))
    }

    pub fn entries(&self) -> &[RouteAccessEntry] {
        &self.entries
    }
}

impl Default for RouteAccessTable {
    fn default() -> Self {
        let entries = DEFAULT_ROUTES
            .iter()
            .map(|(pattern, roles)| RouteAccessEntry {
                pattern: (*pattern).to_string(),
                matcher: Regex::new(&format!("^(?:{})$", pattern))
                    .unwrap_or_else(|e| panic!("built-in route pattern {pattern} is invalid: {e}")),
                allowed_roles: roles.to_vec(),
            })
            .collect();
        Self { entries }
    }
}
