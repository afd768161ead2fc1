//! The users join: a subject's `users` references paired with the user each
//! one resolves to, and the policy for references that resolve to nothing.

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct as _};
use uuid::Uuid;

use crate::user::User;

/// What to do with a reference whose user no longer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
  /// Omit dangling references from the result.
  #[default]
  Drop,
  /// Keep each dangling reference in place as an [`Enrollee::Unresolved`].
  Placeholder,
}

/// One reference from a subject's `users` list and the user it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRef {
  pub id:   Uuid,
  pub user: Option<User>,
}

/// Result of [`SubjectStore::join_users`](crate::store::SubjectStore::join_users),
/// in reference order. Empty when the subject does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserJoin {
  pub refs: Vec<JoinedRef>,
}

/// A single entry of the users-in-subject response.
///
/// A resolved entry serializes as the user itself, an unresolved one as
/// `{"id": ..., "unresolved": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrollee {
  User(User),
  Unresolved(Uuid),
}

impl Serialize for Enrollee {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Enrollee::User(user) => user.serialize(serializer),
      Enrollee::Unresolved(id) => {
        let mut entry = serializer.serialize_struct("Unresolved", 2)?;
        entry.serialize_field("id", id)?;
        entry.serialize_field("unresolved", &true)?;
        entry.end()
      }
    }
  }
}

impl UserJoin {
  /// Identifiers that did not resolve to a user.
  pub fn unresolved(&self) -> impl Iterator<Item = Uuid> + '_ {
    self.refs.iter().filter(|r| r.user.is_none()).map(|r| r.id)
  }

  pub fn resolve(self, policy: UnresolvedPolicy) -> Vec<Enrollee> {
    self
      .refs
      .into_iter()
      .filter_map(|r| match (r.user, policy) {
        (Some(user), _) => Some(Enrollee::User(user)),
        (None, UnresolvedPolicy::Drop) => None,
        (None, UnresolvedPolicy::Placeholder) => Some(Enrollee::Unresolved(r.id)),
      })
      .collect()
  }
}
