//! Navigation gate.
//!
//! [`AccessGate::decide`] turns a request path and the raw session cookie
//! into either [`GateDecision::Allow`] or a redirect. It never fails: every
//! authentication or authorization problem becomes a redirect, either to the
//! sign-in page or to the caller's own landing page.
//!
//! Static assets and the `/api` namespace bypass the gate entirely; API
//! handlers authorize each request themselves.

use schooldesk_core::Role;

use crate::claims::Session;
use crate::routes::RouteAccessTable;
use crate::token::TokenService;

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const HOME_PATH: &str = "/";

const API_PREFIX: &str = "/api";
const ASSET_PREFIXES: &[&str] = &["/_next/", "/static/", "/assets/"];
/// File extensions served as static files from any directory.
const ASSET_EXTENSIONS: &[&str] = &[
    "html", "css", "js", "json", "map", "txt", "xml", "webmanifest", "ico", "png", "jpg",
    "jpeg", "gif", "svg", "webp", "avif", "ttf", "woff", "woff2", "csv", "pdf", "docx",
    "xlsx", "zip",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect {
        to: String,
        clear_cookie: bool,
    },
}

impl GateDecision {
    fn redirect(to: impl Into<String>) -> Self {
        GateDecision::Redirect {
            to: to.into(),
            clear_cookie: false,
        }
    }

    fn sign_in_clearing_cookie() -> Self {
        GateDecision::Redirect {
            to: SIGN_IN_PATH.to_string(),
            clear_cookie: true,
        }
    }

    pub fn clears_cookie(&self) -> bool {
        match self {
            GateDecision::Allow => false,
            GateDecision::Redirect { clear_cookie, .. } => *clear_cookie,
        }
    }

    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            GateDecision::Allow => "allow",
            GateDecision::Redirect { to, .. } if to == SIGN_IN_PATH => "redirect_sign_in",
            GateDecision::Redirect { .. } => "redirect_home",
        }
    }
}

/// Outcome of reading the session cookie.
enum CookieSession {
    Absent,
    Invalid,
    Valid(Session),
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    tokens: TokenService,
    routes: RouteAccessTable,
}

impl AccessGate {
    pub fn new(tokens: TokenService, routes: RouteAccessTable) -> Self {
        Self { tokens, routes }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn routes(&self) -> &RouteAccessTable {
        &self.routes
    }

    /// Paths the gate never inspects.
    pub fn bypasses(path: &str) -> bool {
        if path == API_PREFIX || path.starts_with("/api/") {
            return true;
        }
        if path == "/favicon.ico" || ASSET_PREFIXES.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        path.rsplit('/')
            .next()
            .and_then(|segment| segment.rsplit_once('.'))
            .is_some_and(|(stem, ext)| {
                !stem.is_empty()
                    && ASSET_EXTENSIONS
                        .iter()
                        .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    pub fn decide(&self, path: &str, token: Option<&str>) -> GateDecision {
        if Self::bypasses(path) {
            return GateDecision::Allow;
        }

        let session = self.read_session(token);

        if path == SIGN_IN_PATH || path == HOME_PATH {
            return match session {
                CookieSession::Valid(session) => GateDecision::redirect(session.role.home_path()),
                // Clearing the cookie is what stops the redirect loop.
                CookieSession::Invalid => GateDecision::sign_in_clearing_cookie(),
                CookieSession::Absent => GateDecision::Allow,
            };
        }

        match session {
            CookieSession::Absent => GateDecision::redirect(SIGN_IN_PATH),
            CookieSession::Invalid => GateDecision::sign_in_clearing_cookie(),
            CookieSession::Valid(session) => self.authorize(path, session.role),
        }
    }

    fn authorize(&self, path: &str, role: Role) -> GateDecision {
        if self.routes.is_allowed(path, role) {
            GateDecision::Allow
        } else {
            tracing::debug!(path, role = %role, "role not allowed on path");
            GateDecision::redirect(role.home_path())
        }
    }

    fn read_session(&self, token: Option<&str>) -> CookieSession {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return CookieSession::Absent;
        };

        // Cheap shape check first; only a signature-verified session counts.
        if self.tokens.structurally_validate(token).is_none() {
            return CookieSession::Invalid;
        }
        match self.tokens.verify(token) {
            Some(session) => CookieSession::Valid(session),
            None => CookieSession::Invalid,
        }
    }
}
