//! HTTP error handling and automated response generation
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{constants::api::DEBUG, db::errors::DatabaseError};

/// Represents an HTTP status code, optionally with a custom message.
#[derive(Debug)]
pub struct HttpError {
    /// The numeric HTTP status code to respond with.
    status: StatusCode,
    /// The message to include in the response.
    message: Option<String>,
}

impl From<StatusCode> for HttpError {
    fn from(err: StatusCode) -> Self {
        Self {
            status: err,
            message: None,
        }
    }
}

impl HttpError {
    /// Construct a new HTTP error with a given status code and message.
    pub const fn new(status: StatusCode, message: Option<String>) -> Self {
        Self { status, message }
    }
    /// A 404 naming the missing entity.
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            Some(format!("{entity} {id} not found")),
        )
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let message = self
            .message
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("").to_owned());
        (self.status, Json(json!({"message": message}))).into_response()
    }
}

impl From<DatabaseError> for HttpError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!(error = %err, "Error raised from database in handler");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            DEBUG.then(|| err.to_string()),
        )
    }
}
