use crate::configuration::AuthSettings;
use crate::middleware::authentication::{extract_bearer_token, get_header};
use crate::middleware::AuthError;
use crate::models::IdentityContext;
use actix_web::dev::ServiceRequest;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

/// Checks bearer credentials against the shared signing secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        // `exp` is compared to the current second with no grace period
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(&settings.jwt_secret, settings.algorithm)
    }

    /// Signature first, then expiry, then the identity claims.
    pub fn verify(&self, token: &str) -> Result<IdentityContext, AuthError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                kind => {
                    tracing::debug!("token rejected: {:?}", kind);
                    AuthError::InvalidSignature
                }
            })?;

        IdentityContext::from_claims(data.claims)
    }
}

#[tracing::instrument(name = "Authenticate with JWT", skip_all, fields(path = %req.path()))]
pub fn try_jwt(req: &ServiceRequest, verifier: &TokenVerifier) -> Result<IdentityContext, AuthError> {
    let authorization = get_header::<String>(req, "authorization")
        .map_err(|err| {
            tracing::warn!("unreadable authorization header: {}", err);
            AuthError::MissingCredential
        })?
        .ok_or(AuthError::MissingCredential)?;

    let token = extract_bearer_token(&authorization).map_err(|err| {
        tracing::warn!("malformed authorization header: {}", err);
        AuthError::MissingCredential
    })?;

    let identity = verifier.verify(token)?;
    tracing::debug!(subject = %identity.subject(), "JWT authentication successful");

    Ok(identity)
}
