//! Response bodies and error mapping.
//!
//! Failures keep the `{"error": "..."}` body that clients already inspect,
//! and are also signaled by the status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Student, StudentId};

/// Errors returned by the student handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// A lookup by id, name, or name and age matched nothing.
    #[error("The student was not found.")]
    StudentNotFound,

    /// A mutation targeted an id that is not in the store.
    #[error("No student was found.")]
    NoStudent { id: StudentId },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StudentNotFound | ApiError::NoStudent { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NoStudent { id } => tracing::warn!(id, "No student with this id"),
            ApiError::StudentNotFound => tracing::debug!("Student lookup matched nothing"),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of informational responses (greeting, deletion confirmation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn deleted(id: StudentId) -> Self {
        Self::new(format!("Student with ID {} was successfully deleted.", id))
    }
}

/// A newly created record together with the id it was stored under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedStudent {
    pub id: StudentId,
    #[serde(flatten)]
    pub student: Student,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::StudentNotFound.to_string(), "The student was not found.");
        assert_eq!(ApiError::NoStudent { id: 9 }.to_string(), "No student was found.");
        assert_eq!(ApiError::NoStudent { id: 9 }.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::StudentNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_deleted_message() {
        assert_eq!(
            MessageBody::deleted(3).message,
            "Student with ID 3 was successfully deleted."
        );
    }

    #[test]
    fn test_created_student_is_flat() {
        let created = CreatedStudent {
            id: 4,
            student: Student::new("Jack", 15, "year 10"),
        };
        let value = serde_json::to_value(&created).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 4, "name": "Jack", "age": 15, "year": "year 10"})
        );
    }
}
