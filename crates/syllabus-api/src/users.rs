//! Handlers for `/users` endpoints — the minimal surface needed to populate
//! the users that subjects reference.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/users` | Body: `{"name","age","email"}`; 201 + user |
//! | `GET`    | `/users` | All users, unordered |
//! | `GET`    | `/users/:id` | `null` if not found (404 in strict mode) |
//! | `DELETE` | `/users/:id` | Subjects keep their (now dangling) references |

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
  store::SubjectStore,
  user::{User, UserDraft},
};

use crate::{AppState, error::ApiError, error::Operation, parse_id};

/// `POST /users`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<UserDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::CreateUser;
  let Json(draft) = body.map_err(|e| ApiError::bad_request(op, e.body_text()))?;

  let user = state.store.create_user(draft).await.map_err(state.failed(op))?;
  tracing::debug!(user = %user.id, "created user");
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<User>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let users = state
    .store
    .list_users()
    .await
    .map_err(state.failed(Operation::ListUsers))?;
  Ok(Json(users))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<User>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::GetUser;
  let id = parse_id(op, path)?;

  let user = state.store.get_user(id).await.map_err(state.failed(op))?;
  state.found(user, ApiError::USER_NOT_FOUND)
}

/// `DELETE /users/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<User>>, ApiError>
where
  S: SubjectStore + 'static,
{
  let op = Operation::DeleteUser;
  let id = parse_id(op, path)?;

  let user = state.store.delete_user(id).await.map_err(state.failed(op))?;
  if user.is_some() {
    tracing::debug!(user = %id, "deleted user");
  }
  state.found(user, ApiError::USER_NOT_FOUND)
}
