//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into consistent status codes and bodies. Validation
//! failures render the raw field→messages map as the 422 body; internal
//! details are never leaked to clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::Error;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Error::Validation(errors) => {
                HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY).json(errors)
            }
            Error::NotFound { .. } => HttpResponse::NotFound().json(json!({
                "code": "not_found",
                "message": self.to_string(),
            })),
            Error::Unavailable(message) => {
                error!(%message, "datastore unavailable");
                HttpResponse::ServiceUnavailable().json(json!({
                    "code": "service_unavailable",
                    "message": "Service unavailable",
                }))
            }
            Error::Internal(message) => {
                // Do not leak implementation details to clients.
                error!(%message, "unhandled datastore error");
                HttpResponse::InternalServerError().json(json!({
                    "code": "internal_error",
                    "message": "Internal server error",
                }))
            }
        }
    }
}
