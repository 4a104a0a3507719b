use schooldesk_auth::Session;
use schooldesk_config::SESSION_COOKIE_NAME;
use schooldesk_core::{PaginationMeta, Role};
use schooldesk_query::{FilterOption, Record};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{ErrorResponse, LoginRequest, LoginResponse, SuccessResponse};
use crate::modules::records::model::ListResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_session,
        crate::modules::records::controller::list_records,
        crate::modules::records::controller::list_facet_options,
        crate::modules::records::controller::create_record,
        crate::modules::records::controller::update_record,
        crate::modules::records::controller::delete_record,
    ),
    components(
        schemas(
            Role,
            Session,
            LoginRequest,
            LoginResponse,
            SuccessResponse,
            ErrorResponse,
            Record,
            ListResponse,
            FilterOption,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-in, sign-out and session introspection"),
        (name = "Lists", description = "Role-scoped dashboard lists and record management")
    ),
    info(
        title = "SchoolDesk API",
        version = "0.1.0",
        description = "Role-based school dashboard API: cookie sessions, route gating and scoped list queries.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            )
        }
    }
}
