//! The `SubjectStore` trait: the persistence service behind the HTTP layer.
//!
//! The trait is implemented by storage backends (e.g. `syllabus-store-sqlite`).
//! Handlers depend on this abstraction, not on any concrete backend. Every
//! operation is a single pass-through to storage; validation of drafts happens
//! inside `create_*` and `replace_*`.

use std::future::Future;

use uuid::Uuid;

use crate::{
  enrollment::UserJoin,
  subject::{Subject, SubjectDraft},
  user::{User, UserDraft},
};

// ─── Failure classification ──────────────────────────────────────────────────

/// Coarse cause of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The caller sent something the store refuses (e.g. a missing required
  /// field).
  InvalidInput,
  /// Storage was unavailable or returned data it could not decode.
  Backend,
}

/// Implemented by store error types so callers can map failures to status
/// codes without knowing the backend.
pub trait StoreFailure {
  fn kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Syllabus store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SubjectStore: Send + Sync {
  type Error: std::error::Error + StoreFailure + Send + Sync + 'static;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Validate `draft`, assign an id and persist it.
  fn create_subject(
    &self,
    draft: SubjectDraft,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  /// Every stored subject. Order is unspecified.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Retrieve a subject by id. Returns `None` if not found.
  fn get_subject(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Replace every field of subject `id` with the validated `draft`.
  ///
  /// Returns the subject after replacement, or `None` if `id` is absent.
  /// Validation runs before the existence check.
  fn replace_subject(
    &self,
    id: Uuid,
    draft: SubjectDraft,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Permanently remove subject `id`, returning it as it was immediately
  /// before deletion, or `None` if absent.
  fn delete_subject(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;

  /// Resolve the `users` references of subject `id` against the user store.
  ///
  /// Returns an empty join if the subject does not exist.
  fn join_users(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<UserJoin, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  fn create_user(
    &self,
    draft: UserDraft,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Remove user `id`. References to it held by subjects are left dangling.
  fn delete_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
