use crate::middleware::AuthError;
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Verified claims of the caller, attached to the request by the token gate.
///
/// Built only from a payload whose signature and expiry have already been
/// checked. Cloning is cheap; the claim map is shared and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityContext {
    subject: String,
    email: String,
    claims: Arc<Map<String, Value>>,
}

impl IdentityContext {
    /// Requires string `sub` and `email` claims.
    pub fn from_claims(claims: Map<String, Value>) -> Result<Self, AuthError> {
        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .ok_or(AuthError::InvalidClaims)?
            .to_string();
        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .ok_or(AuthError::InvalidClaims)?
            .to_string();

        Ok(Self {
            subject,
            email,
            claims: Arc::new(claims),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get("exp")
            .and_then(Value::as_i64)
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

/// Handlers behind the token gate can take the context as an argument.
/// Outside the gate extraction fails closed as unauthenticated.
impl FromRequest for IdentityContext {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<IdentityContext>().cloned();
        ready(identity.ok_or(AuthError::MissingCredential))
    }
}

/// Public projection of the identity, returned by `/cms/me`.
#[derive(Debug, Serialize)]
pub struct IdentityView {
    pub subject: String,
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&IdentityContext> for IdentityView {
    fn from(identity: &IdentityContext) -> Self {
        Self {
            subject: identity.subject().to_string(),
            email: identity.email().to_string(),
            expires_at: identity.expires_at(),
        }
    }
}
