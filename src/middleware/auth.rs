use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::ContextBuilder;

/// Resolves the caller into a [`crate::models::Viewer`] and stores it in the
/// request extensions. Never rejects a request: bad or missing credentials
/// simply yield an anonymous viewer.
pub struct AuthMiddleware {
    builder: ContextBuilder,
}

impl AuthMiddleware {
    pub fn new(builder: ContextBuilder) -> Self {
        Self { builder }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            builder: self.builder.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    builder: ContextBuilder,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let viewer = {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());
            self.builder.build(header)
        };

        if let Some(user) = viewer.user() {
            log::debug!("Request authenticated as user {}", user.id);
        }
        req.extensions_mut().insert(viewer);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
