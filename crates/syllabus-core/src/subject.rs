//! Subject — a course record that references the users enrolled in it.
//!
//! The `users` list holds identifiers only. Users are owned elsewhere and are
//! resolved on read through [`SubjectStore::join_users`](crate::store::SubjectStore::join_users).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RequiredFields, ValidationError};

/// A persisted subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:         Uuid,
  pub name:       String,
  pub teacher:    String,
  pub difficulty: String,
  pub users:      Vec<Uuid>,
}

/// Candidate subject fields as received from a client.
///
/// Every field is optional here; [`SubjectDraft::validate`] decides whether
/// the draft may be persisted. Unknown fields (including a client-supplied
/// `id`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectDraft {
  pub name:       Option<String>,
  pub teacher:    Option<String>,
  pub difficulty: Option<String>,
  pub users:      Option<Vec<Uuid>>,
}

/// A draft that passed validation. `users` defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  pub name:       String,
  pub teacher:    String,
  pub difficulty: String,
  pub users:      Vec<Uuid>,
}

impl SubjectDraft {
  pub fn new(
    name: impl Into<String>,
    teacher: impl Into<String>,
    difficulty: impl Into<String>,
  ) -> Self {
    Self {
      name:       Some(name.into()),
      teacher:    Some(teacher.into()),
      difficulty: Some(difficulty.into()),
      users:      None,
    }
  }

  pub fn with_users(mut self, users: impl IntoIterator<Item = Uuid>) -> Self {
    self.users = Some(users.into_iter().collect());
    self
  }

  /// Enforce the required-field rule: `name`, `teacher` and `difficulty`
  /// must be present and non-empty.
  pub fn validate(self) -> Result<NewSubject, ValidationError> {
    let mut required = RequiredFields::new("subject");
    let name = required.text("name", self.name);
    let teacher = required.text("teacher", self.teacher);
    let difficulty = required.text("difficulty", self.difficulty);
    required.finish(NewSubject {
      name,
      teacher,
      difficulty,
      users: self.users.unwrap_or_default(),
    })
  }
}

impl NewSubject {
  pub fn with_id(self, id: Uuid) -> Subject {
    Subject {
      id,
      name: self.name,
      teacher: self.teacher,
      difficulty: self.difficulty,
      users: self.users,
    }
  }
}
