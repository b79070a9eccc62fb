use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced at the HTTP boundary.
///
/// The validator and the strategy engine are total; everything here comes
/// from requests that could not be bound to the expected shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing X-Game-Id header")]
    MissingGameId,

    #[error("X-Game-Id header is not valid UTF-8")]
    InvalidGameId,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("no card to choose from")]
    NothingToChoose,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("application/json")
            .json(json!({
                "error": self.to_string()
            }))
    }
}

/// Routes JSON extraction failures through [`ApiError`] so every bad body
/// gets the same status and shape.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::warn!(error = %err, "rejected request body");
    ApiError::InvalidBody(err.to_string()).into()
}
