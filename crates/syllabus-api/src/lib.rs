//! JSON REST API for Syllabus.
//!
//! Exposes an axum [`Router`] backed by any [`syllabus_core::store::SubjectStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", syllabus_api::api_router(store.clone(), ApiOptions::default()))
//! ```

pub mod error;
pub mod subjects;
pub mod users;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::{Path, rejection::PathRejection},
  routing::get,
};
use serde::Deserialize;
use syllabus_core::{enrollment::UnresolvedPolicy, store::SubjectStore};
use uuid::Uuid;

pub use error::{ApiError, Operation};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Behavioural switches for the handlers.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApiOptions {
  /// Report absent entities on single-entity routes as 404 instead of
  /// `200 null`, and backend failures as 500 instead of 400.
  #[serde(default)]
  pub strict_status:    bool,
  /// How `GET /subjects/{id}/users` renders references to deleted users.
  #[serde(default)]
  pub unresolved_users: UnresolvedPolicy,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:   Arc<S>,
  pub options: ApiOptions,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), options: self.options }
  }
}

impl<S: SubjectStore> AppState<S> {
  /// Map a store error for `op` according to the configured status mode.
  pub(crate) fn failed(&self, op: Operation) -> impl FnOnce(S::Error) -> ApiError {
    let strict = self.options.strict_status;
    move |e| ApiError::store(op, e, strict)
  }

  /// Render an optional entity: `null` in compatible mode, `not_found` in
  /// strict mode.
  pub(crate) fn found<T>(
    &self,
    entity: Option<T>,
    not_found: ApiError,
  ) -> Result<Json<Option<T>>, ApiError> {
    match entity {
      None if self.options.strict_status => Err(not_found),
      entity => Ok(Json(entity)),
    }
  }
}

/// Parse a path identifier. A malformed id, or a segment axum could not
/// decode, fails the operation like any other rejected input.
pub(crate) fn parse_id(
  op: Operation,
  path: Result<Path<String>, PathRejection>,
) -> Result<Uuid, ApiError> {
  let Path(raw) = path.map_err(|e| ApiError::bad_request(op, e.body_text()))?;
  Uuid::parse_str(&raw)
    .map_err(|e| ApiError::bad_request(op, format!("invalid identifier {raw:?}: {e}")))
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, options: ApiOptions) -> Router<()>
where
  S: SubjectStore + 'static,
{
  let subject_collection = get(subjects::list::<S>).post(subjects::create::<S>);
  let subject_one = get(subjects::get_one::<S>)
    .put(subjects::replace::<S>)
    .delete(subjects::delete::<S>);
  let subject_users = get(subjects::users::<S>);
  let user_collection = get(users::list::<S>).post(users::create::<S>);
  let user_one = get(users::get_one::<S>).delete(users::delete::<S>);

  // Every route also answers with a trailing slash.
  Router::new()
    // Subjects
    .route("/subjects", subject_collection.clone())
    .route("/subjects/", subject_collection)
    .route("/subjects/{id}", subject_one.clone())
    .route("/subjects/{id}/", subject_one)
    .route("/subjects/{id}/users", subject_users.clone())
    .route("/subjects/{id}/users/", subject_users)
    // Users
    .route("/users", user_collection.clone())
    .route("/users/", user_collection)
    .route("/users/{id}", user_one.clone())
    .route("/users/{id}/", user_one)
    .with_state(AppState { store, options })
}
