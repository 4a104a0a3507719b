use schooldesk_auth::Session;
use schooldesk_core::AppError;
use schooldesk_observability::{track_login, track_token_issued};
use tracing::{info, warn};

use crate::modules::auth::model::LoginRequest;
use crate::state::AppState;
use crate::utils::password::verify_password;

pub struct AuthService;

impl AuthService {
    /// Checks the credentials for the requested role and issues a session
    /// token. Unknown user and wrong password are indistinguishable.
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<(String, Session), AppError> {
        let user = state.credentials.find_user(&dto.username, dto.role).await?;

        let user = match user {
            Some(user) if verify_password(&dto.password, &user.password_hash) => user,
            _ => {
                warn!(username = %dto.username, role = %dto.role, "Login failed");
                track_login("failure", dto.role.as_str());
                return Err(AppError::unauthorized("Invalid credentials".to_string()));
            }
        };

        let session = Session::new(
            user.id.to_string(),
            user.username,
            user.role,
            state.tokens().session_ttl_secs(),
        );
        let token = state.tokens().issue(&session)?;

        track_token_issued();
        track_login("success", session.role.as_str());
        info!(user_id = %session.sub, role = %session.role, "User signed in");

        Ok((token, session))
    }
}
