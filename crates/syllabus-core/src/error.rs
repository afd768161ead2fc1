//! Error types for `syllabus-core`.

use std::fmt;

use thiserror::Error;

use crate::store::{FailureKind, StoreFailure};

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),
}

impl StoreFailure for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::Validation(_) => FailureKind::InvalidInput,
    }
  }
}

/// A document was rejected because one or more required fields were absent.
///
/// Fields are listed in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
  pub entity:  &'static str,
  pub missing: Vec<&'static str>,
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} validation failed", self.entity)?;
    for (i, field) in self.missing.iter().enumerate() {
      let sep = if i == 0 { ": " } else { ", " };
      write!(f, "{sep}{field}: field `{field}` is required")?;
    }
    Ok(())
  }
}

/// Accumulates missing required fields while a draft is checked.
#[derive(Debug)]
pub(crate) struct RequiredFields {
  entity:  &'static str,
  missing: Vec<&'static str>,
}

impl RequiredFields {
  pub(crate) fn new(entity: &'static str) -> Self {
    Self { entity, missing: Vec::new() }
  }

  /// A required string must be present and non-empty.
  pub(crate) fn text(&mut self, field: &'static str, value: Option<String>) -> String {
    match value {
      Some(v) if !v.is_empty() => v,
      _ => {
        self.missing.push(field);
        String::new()
      }
    }
  }

  pub(crate) fn value<T: Default>(&mut self, field: &'static str, value: Option<T>) -> T {
    value.unwrap_or_else(|| {
      self.missing.push(field);
      T::default()
    })
  }

  pub(crate) fn finish<T>(self, validated: T) -> Result<T, ValidationError> {
    if self.missing.is_empty() {
      Ok(validated)
    } else {
      Err(ValidationError { entity: self.entity, missing: self.missing })
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_message_lists_every_missing_field() {
    let err = ValidationError { entity: "subject", missing: vec!["name", "difficulty"] };
    assert_eq!(
      err.to_string(),
      "subject validation failed: name: field `name` is required, \
       difficulty: field `difficulty` is required"
    );
  }

  #[test]
  fn validation_errors_are_invalid_input() {
    let err = Error::from(ValidationError { entity: "user", missing: vec!["email"] });
    assert_eq!(err.kind(), FailureKind::InvalidInput);
  }
}
