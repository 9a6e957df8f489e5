use crate::configuration::AuthSettings;
use crate::middleware::authentication::{method::TokenVerifier, TokenGateMiddleware};
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Bearer-token gate. Wrap every scope whose handlers need an identity.
///
/// The verifier (secret + algorithm) is fixed at construction and shared
/// between workers.
#[derive(Clone)]
pub struct TokenGate {
    verifier: Arc<TokenVerifier>,
}

impl TokenGate {
    pub fn new(settings: &AuthSettings) -> Self {
        Self::with_verifier(TokenVerifier::from_settings(settings))
    }

    pub fn with_verifier(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service,
            verifier: self.verifier.clone(),
        }))
    }
}
