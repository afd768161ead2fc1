//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings; the `users` reference
//! list is stored as a compact JSON array of those strings.

use syllabus_core::{
  enrollment::JoinedRef,
  subject::Subject,
  user::User,
};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── User references ─────────────────────────────────────────────────────────

pub fn encode_users(users: &[Uuid]) -> Result<String> {
  Ok(serde_json::to_string(users)?)
}

pub fn decode_users(s: &str) -> Result<Vec<Uuid>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const SUBJECT_COLUMNS: &str = "subject_id, name, teacher, difficulty, users_json";

/// Raw strings read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id: String,
  pub name:       String,
  pub teacher:    String,
  pub difficulty: String,
  pub users_json: String,
}

impl RawSubject {
  /// Map a row selected with [`SUBJECT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawSubject {
      subject_id: row.get(0)?,
      name:       row.get(1)?,
      teacher:    row.get(2)?,
      difficulty: row.get(3)?,
      users_json: row.get(4)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      id:         decode_uuid(&self.subject_id)?,
      name:       self.name,
      teacher:    self.teacher,
      difficulty: self.difficulty,
      users:      decode_users(&self.users_json)?,
    })
  }
}

pub const USER_COLUMNS: &str = "user_id, name, age, email";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id: String,
  pub name:    String,
  pub age:     i64,
  pub email:   String,
}

impl RawUser {
  /// Map a row selected with [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawUser {
      user_id: row.get(0)?,
      name:    row.get(1)?,
      age:     row.get(2)?,
      email:   row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:    decode_uuid(&self.user_id)?,
      name:  self.name,
      age:   self.age,
      email: self.email,
    })
  }
}

/// One `json_each` element of a subject's reference list, left-joined with
/// `users`. The user columns are all `NULL` when the reference dangles.
pub struct RawJoinedRef {
  pub ref_id: String,
  pub user:   Option<RawUser>,
}

impl RawJoinedRef {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let ref_id: String = row.get(0)?;
    let user_id: Option<String> = row.get(1)?;
    let user = match user_id {
      Some(user_id) => Some(RawUser {
        user_id,
        name:  row.get(2)?,
        age:   row.get(3)?,
        email: row.get(4)?,
      }),
      None => None,
    };
    Ok(RawJoinedRef { ref_id, user })
  }

  pub fn into_joined(self) -> Result<JoinedRef> {
    Ok(JoinedRef {
      id:   decode_uuid(&self.ref_id)?,
      user: self.user.map(RawUser::into_user).transpose()?,
    })
  }
}
