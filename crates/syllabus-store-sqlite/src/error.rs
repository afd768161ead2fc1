//! Error type for `syllabus-store-sqlite`.

use syllabus_core::store::{FailureKind, StoreFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] syllabus_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),
}

impl From<syllabus_core::ValidationError> for Error {
  fn from(e: syllabus_core::ValidationError) -> Self { Error::Core(e.into()) }
}

impl StoreFailure for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::Database(_) | Error::Json(_) | Error::Uuid(_) => FailureKind::Backend,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
