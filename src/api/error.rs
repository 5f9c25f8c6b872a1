//! HTTP error translation.
//!
//! Every failure a handler can produce is one `ApiError` variant, built once
//! and rendered as `{"status": <code>, "message": <text>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::DbError;

/// Message returned when a unique name collides, for tags and folders alike.
pub const DUPLICATE_NAME_MESSAGE: &str = "The folder name already exists";

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 400)]
    pub status: u16,
    /// Error message
    #[schema(example = "The `id` is not valid")]
    pub message: String,
}

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    /// Malformed identifier or reference.
    #[error("{message}")]
    #[diagnostic(code(noteful::api::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Missing `{field}` in request body")]
    #[diagnostic(code(noteful::api::missing_field))]
    MissingField { field: &'static str },

    #[error("{}", DUPLICATE_NAME_MESSAGE)]
    #[diagnostic(code(noteful::api::duplicate_name))]
    DuplicateName,

    /// Body was not valid JSON for the endpoint.
    #[error("{message}")]
    #[diagnostic(code(noteful::api::malformed_body))]
    MalformedBody { message: String },

    #[error("Not Found")]
    #[diagnostic(code(noteful::api::not_found))]
    NotFound,

    #[error("Internal Server Error")]
    #[diagnostic(code(noteful::api::unhandled))]
    Unhandled {
        #[source]
        source: DbError,
    },
}

impl ApiError {
    /// `field` was present but is not a well-formed id.
    pub fn invalid_id(field: &str) -> Self {
        Self::InvalidArgument {
            message: format!("The `{}` is not valid", field),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument { .. }
            | Self::MissingField { .. }
            | Self::DuplicateName
            | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unhandled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateKey { .. } => Self::DuplicateName,
            DbError::ForeignKey { .. } => Self::InvalidArgument {
                message: "A referenced folder or tag does not exist".to_string(),
            },
            source => Self::Unhandled { source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Unhandled { source } = &self {
            tracing::error!(error = %source, "unhandled store error");
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Generic fallback for anything no route handled.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_names_the_field() {
        let err = ApiError::invalid_id("id");
        assert_eq!(err.to_string(), "The `id` is not valid");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_field_message() {
        let err = ApiError::MissingField { field: "name" };
        assert_eq!(err.to_string(), "Missing `name` in request body");
    }

    #[test]
    fn duplicate_key_becomes_duplicate_name() {
        let err = ApiError::from(DbError::DuplicateKey {
            entity_type: "tag".to_string(),
            key: "baz".to_string(),
        });
        assert!(matches!(err, ApiError::DuplicateName));
        assert_eq!(err.to_string(), "The folder name already exists");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn foreign_key_becomes_bad_request() {
        let err = ApiError::from(DbError::ForeignKey {
            message: "FOREIGN KEY constraint failed".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_store_errors_are_unhandled() {
        let err = ApiError::from(DbError::Database {
            message: "disk I/O error".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn response_carries_status_in_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
