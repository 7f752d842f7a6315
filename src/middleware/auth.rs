use crate::core::AppError;
use crate::modules::auth::TokenService;
use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Verified admin identity of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminId(pub String);

impl FromRequest for AdminId {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AdminId>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::unauthorized("Authentication required"))),
        )
    }
}

/// Bearer token authentication middleware
pub struct BearerAuth {
    tokens: TokenService,
}

impl BearerAuth {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            let verified = bearer_token(&req)
                .ok_or_else(|| AppError::unauthorized("Missing bearer token"))
                .and_then(|token| tokens.verify(&token));

            match verified {
                Ok(claims) => {
                    // Handlers read the admin through the AdminId extractor
                    req.extensions_mut().insert(AdminId(claims.sub));
                    svc.call(req).await.map(|res| res.map_into_right_body())
                }
                Err(err) => {
                    tracing::debug!(path = %req.path(), error = %err, "Rejected unauthenticated request");
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_left_body())
                }
            }
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
