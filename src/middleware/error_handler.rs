use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    Error, HttpRequest,
};

use crate::core::AppError;

/// Render malformed JSON bodies in the application error format
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON body");
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

/// Render malformed query strings in the application error format
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");
    AppError::validation(format!("Invalid query parameters: {}", err)).into()
}

/// Render malformed path segments in the application error format
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected path");
    AppError::validation(format!("Invalid path: {}", err)).into()
}
