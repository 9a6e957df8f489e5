use crate::middleware::authentication::method::{self, TokenVerifier};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::sync::Arc;

pub struct TokenGateMiddleware<S> {
    pub(super) service: S,
    pub(super) verifier: Arc<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
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
        match method::try_jwt(&req, &self.verifier) {
            Ok(identity) => {
                if req.extensions_mut().insert(identity).is_some() {
                    tracing::warn!("identity context replaced by a nested token gate");
                }
                self.service
                    .call(req)
                    .map(|res| res.map(ServiceResponse::map_into_left_body))
                    .boxed_local()
            }
            Err(err) => {
                tracing::warn!(path = %req.path(), reason = %err, "request rejected by token gate");
                let response = req.into_response(err.error_response());
                Box::pin(async move { Ok(response.map_into_right_body()) })
            }
        }
    }
}
