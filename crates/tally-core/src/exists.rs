//! Existence validators.
//!
//! Every lookup is a single point read by primary key and returns a
//! [`Presence`]: callers that need the row to exist call
//! [`Presence::require`], callers that only want to branch on it match.

use crate::{
  Error, Result,
  error::{EntityKind, Resource},
  model::{
    Category, CategoryGroup, DayOfWeek, DefaultSale, Expense, Invoice,
    MealPeriod, MealPeriodCategory, Restaurant, Sale, User,
  },
  store::Repository,
};

// ─── Presence ────────────────────────────────────────────────────────────────

/// The outcome of a point lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
  Found(T),
  Missing(Resource),
}

impl<T> Presence<T> {
  fn of(kind: EntityKind, id: i64, row: Option<T>) -> Self {
    match row {
      Some(row) => Self::Found(row),
      None => Self::Missing(Resource::new(kind, id)),
    }
  }

  pub fn is_found(&self) -> bool { matches!(self, Self::Found(_)) }

  /// Turn absence into [`Error::NotFound`].
  pub fn require(self) -> Result<T> {
    match self {
      Self::Found(row) => Ok(row),
      Self::Missing(resource) => Err(Error::NotFound(resource)),
    }
  }

  pub fn found(self) -> Option<T> {
    match self {
      Self::Found(row) => Some(row),
      Self::Missing(_) => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Presence<U> {
    match self {
      Self::Found(row) => Presence::Found(f(row)),
      Self::Missing(resource) => Presence::Missing(resource),
    }
  }
}

// ─── Per-kind finders ────────────────────────────────────────────────────────

pub fn user(repo: &dyn Repository, id: i64) -> Result<Presence<User>> {
  Ok(Presence::of(EntityKind::User, id, repo.get_user(id)?))
}

pub fn restaurant(repo: &dyn Repository, id: i64) -> Result<Presence<Restaurant>> {
  Ok(Presence::of(EntityKind::Restaurant, id, repo.get_restaurant(id)?))
}

pub fn cat_group(repo: &dyn Repository, id: i64) -> Result<Presence<CategoryGroup>> {
  Ok(Presence::of(EntityKind::CategoryGroup, id, repo.get_cat_group(id)?))
}

pub fn category(repo: &dyn Repository, id: i64) -> Result<Presence<Category>> {
  Ok(Presence::of(EntityKind::Category, id, repo.get_category(id)?))
}

pub fn meal_period(repo: &dyn Repository, id: i64) -> Result<Presence<MealPeriod>> {
  Ok(Presence::of(EntityKind::MealPeriod, id, repo.get_meal_period(id)?))
}

pub fn allocation(
  repo: &dyn Repository,
  id: i64,
) -> Result<Presence<MealPeriodCategory>> {
  Ok(Presence::of(
    EntityKind::MealPeriodCategory,
    id,
    repo.get_allocation(id)?,
  ))
}

pub fn day(repo: &dyn Repository, id: i64) -> Result<Presence<DayOfWeek>> {
  Ok(Presence::of(EntityKind::DayOfWeek, id, repo.get_day(id)?))
}

pub fn default_sale(repo: &dyn Repository, id: i64) -> Result<Presence<DefaultSale>> {
  Ok(Presence::of(EntityKind::DefaultSale, id, repo.get_default_sale(id)?))
}

pub fn sale(repo: &dyn Repository, id: i64) -> Result<Presence<Sale>> {
  Ok(Presence::of(EntityKind::Sale, id, repo.get_sale(id)?))
}

pub fn invoice(repo: &dyn Repository, id: i64) -> Result<Presence<Invoice>> {
  Ok(Presence::of(EntityKind::Invoice, id, repo.get_invoice(id)?))
}

pub fn expense(repo: &dyn Repository, id: i64) -> Result<Presence<Expense>> {
  Ok(Presence::of(EntityKind::Expense, id, repo.get_expense(id)?))
}

// ─── Generic forms ───────────────────────────────────────────────────────────

/// Existence of any kind of row, discarding the row itself.
pub fn exists(
  repo: &dyn Repository,
  kind: EntityKind,
  id: i64,
) -> Result<Presence<()>> {
  Ok(match kind {
    EntityKind::User => user(repo, id)?.map(discard),
    EntityKind::Restaurant => restaurant(repo, id)?.map(discard),
    EntityKind::CategoryGroup => cat_group(repo, id)?.map(discard),
    EntityKind::Category => category(repo, id)?.map(discard),
    EntityKind::MealPeriod => meal_period(repo, id)?.map(discard),
    EntityKind::MealPeriodCategory => allocation(repo, id)?.map(discard),
    EntityKind::DayOfWeek => day(repo, id)?.map(discard),
    EntityKind::DefaultSale => default_sale(repo, id)?.map(discard),
    EntityKind::Sale => sale(repo, id)?.map(discard),
    EntityKind::Invoice => invoice(repo, id)?.map(discard),
    EntityKind::Expense => expense(repo, id)?.map(discard),
  })
}

fn discard<T>(_: T) {}

/// Follow `resource` back to the restaurant that owns it.
///
/// Fails with `NotFound` if the row does not exist, and with `Invalid` for
/// kinds that are not restaurant-scoped (users, days of the week).
pub fn restaurant_of(repo: &dyn Repository, resource: Resource) -> Result<i64> {
  let id = resource.id;
  match resource.kind {
    EntityKind::Restaurant => restaurant(repo, id)?.require().map(|r| r.id),
    EntityKind::CategoryGroup => {
      cat_group(repo, id)?.require().map(|g| g.restaurant_id)
    }
    EntityKind::Category => category(repo, id)?.require().map(|c| c.restaurant_id),
    EntityKind::MealPeriod => {
      meal_period(repo, id)?.require().map(|p| p.restaurant_id)
    }
    EntityKind::MealPeriodCategory => {
      allocation(repo, id)?.require().map(|a| a.restaurant_id)
    }
    EntityKind::DefaultSale => {
      default_sale(repo, id)?.require().map(|s| s.restaurant_id)
    }
    EntityKind::Sale => sale(repo, id)?.require().map(|s| s.restaurant_id),
    EntityKind::Invoice => invoice(repo, id)?.require().map(|i| i.restaurant_id),
    EntityKind::Expense => expense(repo, id)?.require().map(|e| e.restaurant_id),
    EntityKind::User | EntityKind::DayOfWeek => Err(Error::Invalid(format!(
      "a {} does not belong to a restaurant",
      resource.kind
    ))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn require_reports_kind_and_id() {
    let missing: Presence<Invoice> =
      Presence::of(EntityKind::Invoice, 42, None);
    assert!(!missing.is_found());
    let err = missing.require().unwrap_err();
    assert_eq!(err.to_string(), "there is no invoice with id 42");
  }

  #[test]
  fn found_passes_the_row_through() {
    let found = Presence::of(EntityKind::DayOfWeek, 3, Some(DayOfWeek {
      id:   3,
      name: "Wednesday".into(),
    }));
    assert_eq!(found.map(|d| d.name).found().as_deref(), Some("Wednesday"));
  }
}
