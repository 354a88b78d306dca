use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single invalid field with the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured HTTP error carrying a status code, optional title/message
/// and zero or more field errors
///
/// Implements `std::error::Error` so it can travel through `Result`, and
/// `IntoResponse` so handlers can return it directly: the response gets the
/// carried status code and a JSON body (see [`ErrorBody`]).
#[derive(Debug, Clone, Error)]
#[error("{status}")]
pub struct ErrorResponse {
    status: StatusCode,
    title: Option<String>,
    message: Option<String>,
    errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Error with the given status and no detail
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            title: None,
            message: None,
            errors: Vec::new(),
        }
    }

    /// Start a builder for the given status
    pub fn builder(status: StatusCode) -> ErrorResponseBuilder {
        ErrorResponseBuilder {
            status,
            title: None,
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The wire body `{ status, title, message, errors }`
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status.as_u16(),
            title: self.title.clone(),
            message: self.message.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self.body())).into_response()
    }
}

/// Serialized form of [`ErrorResponse`]
///
/// Absent title/message are omitted from the JSON rather than sent as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub errors: Vec<FieldError>,
}

/// Chainable constructor for [`ErrorResponse`]
///
/// Call order does not matter; `build` observes whatever was set.
#[derive(Debug, Clone)]
pub struct ErrorResponseBuilder {
    status: StatusCode,
    title: Option<String>,
    message: Option<String>,
    errors: Vec<FieldError>,
}

impl ErrorResponseBuilder {
    pub fn errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn build(self) -> ErrorResponse {
        ErrorResponse {
            status: self.status,
            title: self.title,
            message: self.message,
            errors: self.errors,
        }
    }
}
