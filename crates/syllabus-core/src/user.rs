//! User — the externally owned entity that subjects reference by id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RequiredFields, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    Uuid,
  pub name:  String,
  pub age:   i64,
  pub email: String,
}

/// Candidate user fields as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDraft {
  pub name:  Option<String>,
  pub age:   Option<i64>,
  pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub name:  String,
  pub age:   i64,
  pub email: String,
}

impl UserDraft {
  pub fn new(name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
    Self {
      name:  Some(name.into()),
      age:   Some(age),
      email: Some(email.into()),
    }
  }

  pub fn validate(self) -> Result<NewUser, ValidationError> {
    let mut required = RequiredFields::new("user");
    let name = required.text("name", self.name);
    let age = required.value("age", self.age);
    let email = required.text("email", self.email);
    required.finish(NewUser { name, age, email })
  }
}

impl NewUser {
  pub fn with_id(self, id: Uuid) -> User {
    User { id, name: self.name, age: self.age, email: self.email }
  }
}
