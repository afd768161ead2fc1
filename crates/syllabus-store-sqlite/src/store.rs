//! [`SqliteStore`] — the SQLite implementation of [`SubjectStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use syllabus_core::{
  enrollment::UserJoin,
  store::SubjectStore,
  subject::{Subject, SubjectDraft},
  user::{User, UserDraft},
};

use crate::{
  encode::{
    encode_users, encode_uuid, RawJoinedRef, RawSubject, RawUser, SUBJECT_COLUMNS,
    USER_COLUMNS,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Syllabus store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SubjectStore impl ───────────────────────────────────────────────────────

impl SubjectStore for SqliteStore {
  type Error = crate::Error;

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn create_subject(&self, draft: SubjectDraft) -> Result<Subject> {
    let subject = draft.validate()?.with_id(Uuid::new_v4());

    let id_str     = encode_uuid(subject.id);
    let name       = subject.name.clone();
    let teacher    = subject.teacher.clone();
    let difficulty = subject.difficulty.clone();
    let users_str  = encode_users(&subject.users)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subjects (subject_id, name, teacher, difficulty, users_json)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, teacher, difficulty, users_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(subject)
  }

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {SUBJECT_COLUMNS} FROM subjects"))?;
        let rows = stmt
          .query_map([], RawSubject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }

  async fn get_subject(&self, id: Uuid) -> Result<Option<Subject>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE subject_id = ?1"),
            rusqlite::params![id_str],
            RawSubject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn replace_subject(&self, id: Uuid, draft: SubjectDraft) -> Result<Option<Subject>> {
    let subject   = draft.validate()?;
    let id_str    = encode_uuid(id);
    let users_str = encode_users(&subject.users)?;

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE subjects
               SET name = ?2, teacher = ?3, difficulty = ?4, users_json = ?5
               WHERE subject_id = ?1
               RETURNING {SUBJECT_COLUMNS}"
            ),
            rusqlite::params![
              id_str,
              subject.name,
              subject.teacher,
              subject.difficulty,
              users_str,
            ],
            RawSubject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn delete_subject(&self, id: Uuid) -> Result<Option<Subject>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("DELETE FROM subjects WHERE subject_id = ?1 RETURNING {SUBJECT_COLUMNS}"),
            rusqlite::params![id_str],
            RawSubject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn join_users(&self, id: Uuid) -> Result<UserJoin> {
    let id_str = encode_uuid(id);

    let raws: Vec<RawJoinedRef> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT j.value, u.user_id, u.name, u.age, u.email
           FROM subjects s
           JOIN json_each(s.users_json) j
           LEFT JOIN users u ON u.user_id = j.value
           WHERE s.subject_id = ?1
           ORDER BY j.key",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawJoinedRef::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let refs = raws
      .into_iter()
      .map(RawJoinedRef::into_joined)
      .collect::<Result<Vec<_>>>()?;
    Ok(UserJoin { refs })
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, draft: UserDraft) -> Result<User> {
    let user = draft.validate()?.with_id(Uuid::new_v4());

    let id_str = encode_uuid(user.id);
    let name   = user.name.clone();
    let age    = user.age;
    let email  = user.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, name, age, email) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, age, email],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users"))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
            rusqlite::params![id_str],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn delete_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("DELETE FROM users WHERE user_id = ?1 RETURNING {USER_COLUMNS}"),
            rusqlite::params![id_str],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
