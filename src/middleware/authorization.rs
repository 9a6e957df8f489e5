use crate::middleware::AuthError;
use crate::models::IdentityContext;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Restricts a scope to the single privileged identity.
///
/// Must be wrapped inside a [`TokenGate`](crate::middleware::authentication::TokenGate):
/// it only reads the identity context the token gate attached and never
/// looks at the credential itself. The email comparison is exact and
/// case-sensitive.
#[derive(Clone)]
pub struct AdminGate {
    privileged_identity: Arc<str>,
}

impl AdminGate {
    pub fn new(privileged_identity: impl Into<String>) -> Self {
        Self {
            privileged_identity: Arc::from(privileged_identity.into()),
        }
    }

    fn permits(&self, identity: Option<&IdentityContext>) -> bool {
        identity.is_some_and(|identity| identity.email() == &*self.privileged_identity)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateMiddleware {
            service,
            gate: self.clone(),
        }))
    }
}

pub struct AdminGateMiddleware<S> {
    service: S,
    gate: AdminGate,
}

impl<S, B> Service<ServiceRequest> for AdminGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let permitted = self.gate.permits(req.extensions().get::<IdentityContext>());

        if permitted {
            return self
                .service
                .call(req)
                .map(|res| res.map(ServiceResponse::map_into_left_body))
                .boxed_local();
        }

        let subject = req
            .extensions()
            .get::<IdentityContext>()
            .map(|identity| identity.subject().to_string());
        tracing::warn!(
            path = %req.path(),
            subject = ?subject,
            "Permission denied"
        );

        let response = req.into_response(AuthError::PermissionDenied.error_response());
        Box::pin(async move { Ok(response.map_into_right_body()) })
    }
}
