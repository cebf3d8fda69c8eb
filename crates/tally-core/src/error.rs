//! Error types for `tally-core`.
//!
//! Every failure belongs to exactly one [`ErrorKind`], which the HTTP layer
//! maps onto a status code. Internal (store) failures carry their source but
//! are never shown to clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

// ─── Resources ───────────────────────────────────────────────────────────────

/// The kinds of rows the store knows about.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
  #[strum(to_string = "user")]
  User,
  #[strum(to_string = "restaurant")]
  Restaurant,
  #[strum(to_string = "category group")]
  CategoryGroup,
  #[strum(to_string = "category")]
  Category,
  #[strum(to_string = "meal period")]
  MealPeriod,
  #[strum(to_string = "meal period / category association")]
  MealPeriodCategory,
  #[strum(to_string = "day of the week")]
  DayOfWeek,
  #[strum(to_string = "default sale entry")]
  DefaultSale,
  #[strum(to_string = "sale record")]
  Sale,
  #[strum(to_string = "invoice")]
  Invoice,
  #[strum(to_string = "expense")]
  Expense,
}

/// A single row, addressed by kind and primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resource {
  pub kind: EntityKind,
  pub id:   i64,
}

impl Resource {
  pub fn new(kind: EntityKind, id: i64) -> Self { Self { kind, id } }
}

impl fmt::Display for Resource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.kind, self.id)
  }
}

/// What an actor attempted when an authorization check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
  View,
  Create,
  Update,
  Delete,
}

// ─── Error ───────────────────────────────────────────────────────────────────

/// Status class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  BadRequest,
  Unauthorized,
  Internal,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("there is no {} with id {}", .0.kind, .0.id)]
  NotFound(Resource),

  #[error(
    "there is no association between user {user_id} and restaurant \
     {restaurant_id}"
  )]
  MembershipNotFound { restaurant_id: i64, user_id: i64 },

  #[error(
    "meal period {meal_period_id} is not associated with category \
     {category_id}"
  )]
  AllocationNotFound { meal_period_id: i64, category_id: i64 },

  #[error("{0}")]
  Duplicate(String),

  #[error("{} not associated with the same restaurant", join_resources(.0))]
  NotSameRestaurant(Vec<Resource>),

  #[error("{0}")]
  Invalid(String),

  #[error("user {user_id} is not authorized to {action} {resource}")]
  Unauthorized {
    user_id:  i64,
    action:   Action,
    resource: Resource,
  },

  #[error("cannot modify the owner's restaurant association")]
  OwnerMembership,

  #[error("invalid email address or password")]
  InvalidCredentials,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn not_found(kind: EntityKind, id: i64) -> Self {
    Self::NotFound(Resource::new(kind, id))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound(_)
      | Self::MembershipNotFound { .. }
      | Self::AllocationNotFound { .. } => ErrorKind::NotFound,
      Self::Duplicate(_) | Self::NotSameRestaurant(_) | Self::Invalid(_) => {
        ErrorKind::BadRequest
      }
      Self::Unauthorized { .. }
      | Self::OwnerMembership
      | Self::InvalidCredentials => ErrorKind::Unauthorized,
      Self::Store(_) => ErrorKind::Internal,
    }
  }
}

/// `"a and b are"` or `"a, b, and c are"`.
fn join_resources(resources: &[Resource]) -> String {
  let names: Vec<String> = resources.iter().map(ToString::to_string).collect();
  match names.as_slice() {
    [] => "no resources are".to_owned(),
    [one] => format!("{one} is"),
    [a, b] => format!("{a} and {b} are"),
    [init @ .., last] => format!("{}, and {last} are", init.join(", ")),
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
