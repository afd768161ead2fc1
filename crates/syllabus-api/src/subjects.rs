//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/subjects` | Body: `{"name","teacher","difficulty","users"?}`; 201 + subject |
//! | `GET`    | `/subjects` | All subjects, unordered |
//! | `GET`    | `/subjects/:id` | `null` if not found (404 in strict mode) |
//! | `PUT`    | `/subjects/:id` | Full replacement; `null` if not found |
//! | `DELETE` | `/subjects/:id` | Returns the deleted subject; `null` if not found |
//! | `GET`    | `/subjects/:id/users` | Resolved users; 404 if the subject is absent |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use syllabus_core::{
  enrollment::Enrollee,
  store::SubjectStore,
  subject::{Subject, SubjectDraft},
};

use crate::{AppState, error::ApiError, error::Operation, parse_id};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /subjects` — returns 201 + the stored [`Subject`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<SubjectDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::CreateSubject;
  let Json(draft) = body.map_err(|e| ApiError::bad_request(op, e.body_text()))?;

  let subject = state
    .store
    .create_subject(draft)
    .await
    .map_err(state.failed(op))?;
  tracing::debug!(subject = %subject.id, "created subject");
  Ok((StatusCode::CREATED, Json(subject)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let subjects = state
    .store
    .list_subjects()
    .await
    .map_err(state.failed(Operation::ListSubjects))?;
  Ok(Json(subjects))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subjects/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Subject>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::GetSubject;
  let id = parse_id(op, path)?;

  let subject = state.store.get_subject(id).await.map_err(state.failed(op))?;
  state.found(subject, ApiError::SUBJECT_NOT_FOUND)
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /subjects/:id` — body is a complete subject; fields left out are not
/// carried over from the stored version.
pub async fn replace<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
  body: Result<Json<SubjectDraft>, JsonRejection>,
) -> Result<Json<Option<Subject>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::UpdateSubject;
  let id = parse_id(op, path)?;
  let Json(draft) = body.map_err(|e| ApiError::bad_request(op, e.body_text()))?;

  let subject = state
    .store
    .replace_subject(id, draft)
    .await
    .map_err(state.failed(op))?;
  if subject.is_some() {
    tracing::debug!(subject = %id, "replaced subject");
  }
  state.found(subject, ApiError::SUBJECT_NOT_FOUND)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subjects/:id` — returns the subject as it was before deletion.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Subject>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::DeleteSubject;
  let id = parse_id(op, path)?;

  let subject = state.store.delete_subject(id).await.map_err(state.failed(op))?;
  if subject.is_some() {
    tracing::debug!(subject = %id, "deleted subject");
  }
  state.found(subject, ApiError::SUBJECT_NOT_FOUND)
}

// ─── Enrolled users ───────────────────────────────────────────────────────────

/// `GET /subjects/:id/users`
///
/// The subject lookup and the join are separate reads; a concurrent write
/// between them is not detected.
pub async fn users<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Enrollee>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::ListEnrolledUsers;
  let id = parse_id(op, path)?;

  state
    .store
    .get_subject(id)
    .await
    .map_err(state.failed(op))?
    .ok_or(ApiError::SUBJECT_NOT_FOUND)?;

  let join = state.store.join_users(id).await.map_err(state.failed(op))?;

  let dangling = join.unresolved().count();
  if dangling > 0 {
    tracing::warn!(
      subject = %id,
      dangling,
      policy = ?state.options.unresolved_users,
      "subject references users that no longer exist"
    );
  }

  Ok(Json(join.resolve(state.options.unresolved_users)))
}
