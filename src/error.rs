//! Typed errors and their HTTP mapping.
//!
//! The repository classifies every failure into one of these variants; raw
//! store errors never escape past it. Outward bodies carry only a generic
//! error string; store detail is logged, never serialized.

use crate::schema::EntityKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Path segment names no known entity kind.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("request body must be a JSON object")]
    InvalidBody,
    /// A request field outside the entity's schema. Never silently dropped.
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("no fields to update")]
    NoFieldsToUpdate,
    #[error("{} not found", .0.display())]
    NotFound(EntityKind),
    /// Any store-level failure: connectivity, constraint violation,
    /// malformed value. `message` is the outward string; `source` stays
    /// internal.
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    pub fn backend(message: String, source: sqlx::Error) -> Self {
        AppError::Backend { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownResource(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_)
            | AppError::InvalidBody
            | AppError::UnknownField(_)
            | AppError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            AppError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The string serialized to the caller as `{"error": ...}`.
    pub fn public_message(&self) -> String {
        match self {
            AppError::UnknownResource(_) => "Not found".into(),
            AppError::InvalidId(_) => "Invalid id".into(),
            AppError::InvalidBody => "Request body must be a JSON object".into(),
            AppError::UnknownField(field) => format!("Unknown field: {}", field),
            AppError::NoFieldsToUpdate => "No fields to update".into(),
            AppError::NotFound(kind) => format!("{} not found", kind.display()),
            AppError::Backend { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Backend { message, source } = &self {
            tracing::error!(error = %source, "{}", message);
        }
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_err() -> AppError {
        AppError::backend(
            "Failed to create student".into(),
            sqlx::Error::PoolTimedOut,
        )
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            AppError::NoFieldsToUpdate.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnknownField("nickname".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(EntityKind::Course).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(backend_err().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn public_messages_match_the_wire_contract() {
        assert_eq!(
            AppError::NoFieldsToUpdate.public_message(),
            "No fields to update"
        );
        assert_eq!(
            AppError::NotFound(EntityKind::Student).public_message(),
            "Student not found"
        );
        assert_eq!(
            AppError::UnknownField("nickname".into()).public_message(),
            "Unknown field: nickname"
        );
    }

    #[test]
    fn backend_detail_never_reaches_the_body() {
        let msg = backend_err().public_message();
        assert_eq!(msg, "Failed to create student");
        assert!(!msg.contains("pool"));
    }
}
