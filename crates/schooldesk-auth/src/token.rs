//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs whose claims are a [`Session`]. Two checks exist:
//!
//! - [`TokenService::verify`] checks the signature, the claim shape and the
//!   expiry. It is the only check allowed to back an access decision.
//! - [`TokenService::structurally_validate`] decodes without checking the
//!   signature. It answers "does this look like a live session" and is used
//!   to discard garbage cookies cheaply and for diagnostics. It never grants
//!   access to anything.
//!
//! Neither check returns an error: any failure is `None`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use schooldesk_config::JwtConfig;
use schooldesk_core::AppError;

use crate::claims::Session;

const REQUIRED_CLAIMS: [&str; 3] = ["exp", "iat", "sub"];

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    structural_validation: Validation,
    session_ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);

        let mut structural_validation = validation.clone();
        structural_validation.insecure_disable_signature_validation();

        Self {
            encoding_key: EncodingKey::from_secret(jwt_config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation,
            structural_validation,
            session_ttl_secs: jwt_config.session_ttl_secs,
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Signs `session` into a token string.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, session: &Session) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), session, &self.encoding_key)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
    }

    /// Verifies signature, claim shape and expiry.
    ///
    /// Expiry is checked against the wall clock at the time of the call.
    pub fn verify(&self, token: &str) -> Option<Session> {
        let session = decode::<Session>(token, &self.decoding_key, &self.validation)
            .map_err(|e| tracing::debug!(error = %e, "session token rejected"))
            .ok()?
            .claims;

        Self::unexpired(session)
    }

    /// Decodes the claims without checking the signature.
    ///
    /// Must not be the basis of any decision that grants access; use
    /// [`TokenService::verify`] for that.
    pub fn structurally_validate(&self, token: &str) -> Option<Session> {
        let session = decode::<Session>(token, &self.decoding_key, &self.structural_validation)
            .ok()?
            .claims;

        Self::unexpired(session)
    }

    fn unexpired(session: Session) -> Option<Session> {
        (!session.is_expired_at(Utc::now().timestamp())).then_some(session)
    }
}
