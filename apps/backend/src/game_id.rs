use actix_web::body::EitherBody;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::fmt;
use std::rc::Rc;
use tracing::Instrument;

use crate::error::ApiError;

/// Header the game server uses to tell matches apart.
pub const GAME_ID_HEADER: &str = "X-Game-Id";

/// Identifier of the match a bot-protocol request belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn from_request_headers(req: &HttpRequest) -> Result<Self, ApiError> {
        let value = req
            .headers()
            .get(GAME_ID_HEADER)
            .ok_or(ApiError::MissingGameId)?;
        let id = value.to_str().map_err(|_| ApiError::InvalidGameId)?;
        Ok(Self(id.to_string()))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for GameId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Set by RequireGameId when the route is wrapped; parse directly otherwise
        let id = match req.extensions().get::<GameId>().cloned() {
            Some(id) => Ok(id),
            None => GameId::from_request_headers(req),
        };
        ready(id)
    }
}

/// Middleware that rejects requests without an `X-Game-Id` header and runs
/// the rest of the request inside a span tagged with the game id.
#[derive(Clone, Default)]
pub struct RequireGameId;

impl RequireGameId {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireGameId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireGameIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireGameIdMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireGameIdMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireGameIdMiddleware<S>
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
        let svc = self.service.clone();

        Box::pin(async move {
            match GameId::from_request_headers(req.request()) {
                Ok(game_id) => {
                    let span = tracing::info_span!("game", game_id = %game_id);
                    req.extensions_mut().insert(game_id);
                    let res = svc.call(req).instrument(span).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    tracing::warn!(path = %req.path(), error = %err, "rejected bot request");
                    let (req, _pl) = req.into_parts();
                    let resp = err.error_response();
                    Ok(ServiceResponse::new(req, resp).map_into_right_body())
                }
            }
        })
    }
}
