//! Integration tests for `SqliteStore` against an in-memory database.

use syllabus_core::{
  enrollment::UnresolvedPolicy,
  store::{FailureKind, StoreFailure, SubjectStore},
  subject::SubjectDraft,
  user::UserDraft,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn algebra() -> SubjectDraft { SubjectDraft::new("Algebra", "Noether", "hard") }

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_subject() {
  let s = store().await;

  let created = s.create_subject(algebra()).await.unwrap();
  assert_eq!(created.name, "Algebra");
  assert!(created.users.is_empty());

  let fetched = s.get_subject(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
  let s = store().await;
  let a = s.create_subject(algebra()).await.unwrap();
  let b = s.create_subject(algebra()).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn create_missing_required_field_is_invalid_input() {
  let s = store().await;
  let mut draft = algebra();
  draft.teacher = None;

  let err = s.create_subject(draft).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::InvalidInput);
  assert!(err.to_string().contains("teacher"), "{err}");
  assert!(s.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_subject_missing_returns_none() {
  let s = store().await;
  assert!(s.get_subject(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_subjects_all() {
  let s = store().await;
  let a = s.create_subject(algebra()).await.unwrap();
  let b = s
    .create_subject(SubjectDraft::new("Optics", "Huygens", "medium"))
    .await
    .unwrap();

  let all = s.list_subjects().await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.contains(&a));
  assert!(all.contains(&b));
}

#[tokio::test]
async fn user_references_roundtrip_in_order() {
  let s = store().await;
  let refs = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

  let created = s.create_subject(algebra().with_users(refs.clone())).await.unwrap();
  let fetched = s.get_subject(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.users, refs);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_overwrites_every_field() {
  let s = store().await;
  let created = s
    .create_subject(algebra().with_users([Uuid::new_v4()]))
    .await
    .unwrap();

  let replaced = s
    .replace_subject(created.id, SubjectDraft::new("Topology", "Hausdorff", "brutal"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(replaced.id, created.id);
  assert_eq!(replaced.name, "Topology");
  assert!(replaced.users.is_empty(), "omitted users must not be preserved");

  let fetched = s.get_subject(created.id).await.unwrap();
  assert_eq!(fetched, Some(replaced));
}

#[tokio::test]
async fn replace_missing_subject_returns_none() {
  let s = store().await;
  let result = s.replace_subject(Uuid::new_v4(), algebra()).await.unwrap();
  assert!(result.is_none());
  assert!(s.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_with_incomplete_draft_fails_and_keeps_original() {
  let s = store().await;
  let created = s.create_subject(algebra()).await.unwrap();

  let mut draft = SubjectDraft::new("Topology", "Hausdorff", "brutal");
  draft.difficulty = None;
  let err = s.replace_subject(created.id, draft).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::InvalidInput);

  let fetched = s.get_subject(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_prior_document() {
  let s = store().await;
  let created = s.create_subject(algebra()).await.unwrap();

  let deleted = s.delete_subject(created.id).await.unwrap();
  assert_eq!(deleted, Some(created.clone()));
  assert!(s.get_subject(created.id).await.unwrap().is_none());

  // A second delete finds nothing.
  assert!(s.delete_subject(created.id).await.unwrap().is_none());
}

// ─── Users join ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn join_users_resolves_in_reference_order() {
  let s = store().await;
  let ada = s.create_user(UserDraft::new("Ada", 36, "ada@example.com")).await.unwrap();
  let bob = s.create_user(UserDraft::new("Bob", 20, "bob@example.com")).await.unwrap();

  let subject = s
    .create_subject(algebra().with_users([bob.id, ada.id]))
    .await
    .unwrap();

  let join = s.join_users(subject.id).await.unwrap();
  assert_eq!(join.unresolved().count(), 0);

  let ids: Vec<_> = join.refs.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![bob.id, ada.id]);
  assert_eq!(join.refs[0].user.as_ref(), Some(&bob));
  assert_eq!(join.refs[1].user.as_ref(), Some(&ada));
}

#[tokio::test]
async fn join_users_reports_dangling_references() {
  let s = store().await;
  let ada = s.create_user(UserDraft::new("Ada", 36, "ada@example.com")).await.unwrap();
  let gone = s.create_user(UserDraft::new("Gone", 50, "gone@example.com")).await.unwrap();
  let never = Uuid::new_v4();

  let subject = s
    .create_subject(algebra().with_users([ada.id, gone.id, never]))
    .await
    .unwrap();
  s.delete_user(gone.id).await.unwrap();

  let join = s.join_users(subject.id).await.unwrap();
  assert_eq!(join.unresolved().collect::<Vec<_>>(), vec![gone.id, never]);

  let users = join.resolve(UnresolvedPolicy::Drop);
  assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn join_users_for_missing_subject_is_empty() {
  let s = store().await;
  let join = s.join_users(Uuid::new_v4()).await.unwrap();
  assert!(join.refs.is_empty());
}

#[tokio::test]
async fn join_users_for_subject_without_references_is_empty() {
  let s = store().await;
  let subject = s.create_subject(algebra()).await.unwrap();
  let join = s.join_users(subject.id).await.unwrap();
  assert!(join.refs.is_empty());
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_get_list_delete_user() {
  let s = store().await;
  let ada = s.create_user(UserDraft::new("Ada", 36, "ada@example.com")).await.unwrap();

  assert_eq!(s.get_user(ada.id).await.unwrap(), Some(ada.clone()));
  assert_eq!(s.list_users().await.unwrap(), vec![ada.clone()]);
  assert_eq!(s.delete_user(ada.id).await.unwrap(), Some(ada.clone()));
  assert!(s.get_user(ada.id).await.unwrap().is_none());
}

#[tokio::test]
async fn create_user_without_email_is_invalid_input() {
  let s = store().await;
  let draft = UserDraft { name: Some("Ada".into()), age: Some(36), email: None };
  let err = s.create_user(draft).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::InvalidInput);
}

#[tokio::test]
async fn deleting_a_subject_leaves_users_alone() {
  let s = store().await;
  let ada = s.create_user(UserDraft::new("Ada", 36, "ada@example.com")).await.unwrap();
  let subject = s.create_subject(algebra().with_users([ada.id])).await.unwrap();

  s.delete_subject(subject.id).await.unwrap();
  assert_eq!(s.get_user(ada.id).await.unwrap(), Some(ada));
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!("syllabus-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("store.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_subject(algebra()).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_subject(id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Algebra");

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
