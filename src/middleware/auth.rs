use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::constants::config::AppConfig;
use crate::error::ApiError;
use crate::utils::jwt::verify_jwt_token;

/// Identity resolved from a verified bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
}

/// Rejects requests without a valid bearer token; wrap it on protected routes only.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
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
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let config = req.app_data::<web::Data<AppConfig>>().cloned();

        Box::pin(async move {
            let config = config
                .ok_or_else(|| ApiError::Internal("AppConfig is not registered".to_string()))?;

            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_owned);

            match token {
                Some(token) => match verify_jwt_token(&token, &config.jwt_secret) {
                    Ok(user_id) => {
                        req.extensions_mut().insert(AuthenticatedUser { id: user_id });
                        svc.call(req).await
                    }
                    Err(e) => {
                        log::debug!("Rejected bearer token: {}", e);
                        Err(ApiError::Unauthorized(
                            "Unauthorized (token expired or invalid). Please log in again."
                                .to_string(),
                        )
                        .into())
                    }
                },
                None => Err(ApiError::Unauthorized("Unauthorized".to_string()).into()),
            }
        })
    }
}
