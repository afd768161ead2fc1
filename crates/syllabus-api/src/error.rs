//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Failures render as the envelope `{"message": ..., "error": ...}` where
//! `message` names the operation that failed. Not-found renders as
//! `{"message": ...}` alone.

use std::fmt;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use syllabus_core::store::{FailureKind, StoreFailure};
use thiserror::Error;

/// The handler-level operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  CreateSubject,
  ListSubjects,
  GetSubject,
  UpdateSubject,
  DeleteSubject,
  ListEnrolledUsers,
  CreateUser,
  ListUsers,
  GetUser,
  DeleteUser,
}

impl Operation {
  pub fn message(self) -> &'static str {
    match self {
      Operation::CreateSubject => "Error creating subject",
      Operation::ListSubjects => "Error getting subjects",
      Operation::GetSubject => "Error getting subject",
      Operation::UpdateSubject => "Error updating subject",
      Operation::DeleteSubject => "Error deleting subject",
      Operation::ListEnrolledUsers => "Error getting users in subject",
      Operation::CreateUser => "Error creating user",
      Operation::ListUsers => "Error getting users",
      Operation::GetUser => "Error getting user",
      Operation::DeleteUser => "Error deleting user",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.message()) }
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(&'static str),

  #[error("{op}: {detail}")]
  Failed {
    op:     Operation,
    status: StatusCode,
    detail: String,
  },
}

impl ApiError {
  pub const SUBJECT_NOT_FOUND: ApiError = ApiError::NotFound("Subject not found");
  pub const USER_NOT_FOUND: ApiError = ApiError::NotFound("User not found");

  /// The request itself was unusable: bad JSON, bad identifier.
  pub fn bad_request(op: Operation, detail: impl fmt::Display) -> Self {
    ApiError::Failed { op, status: StatusCode::BAD_REQUEST, detail: detail.to_string() }
  }

  /// A store call failed. Every failure is a 400 unless `strict` is set, in
  /// which case backend failures become 500.
  pub fn store<E>(op: Operation, err: E, strict: bool) -> Self
  where
    E: std::error::Error + StoreFailure,
  {
    let status = match (strict, err.kind()) {
      (true, FailureKind::Backend) => StatusCode::INTERNAL_SERVER_ERROR,
      _ => StatusCode::BAD_REQUEST,
    };
    ApiError::Failed { op, status, detail: err.to_string() }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Failed { status, .. } => *status,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      ApiError::NotFound(message) => json!({ "message": message }),
      ApiError::Failed { op, detail, .. } => {
        if status.is_server_error() {
          tracing::error!(%op, %detail, "request failed");
        } else {
          tracing::debug!(%op, %detail, "request rejected");
        }
        json!({ "message": op.message(), "error": detail })
      }
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("disk on fire")]
  struct Backend;

  impl StoreFailure for Backend {
    fn kind(&self) -> FailureKind { FailureKind::Backend }
  }

  #[test]
  fn backend_failures_are_400_unless_strict() {
    assert_eq!(
      ApiError::store(Operation::ListSubjects, Backend, false).status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::store(Operation::ListSubjects, Backend, true).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn display_includes_operation_and_detail() {
    let err = ApiError::store(Operation::GetSubject, Backend, false);
    assert_eq!(err.to_string(), "Error getting subject: disk on fire");
  }
}
