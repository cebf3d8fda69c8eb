//! Cross-entity consistency checks.
//!
//! Each check resolves every referenced id to its owning restaurant before
//! comparing anything, so a missing row always surfaces as `NotFound` ahead
//! of a `NotSameRestaurant` mismatch.

use crate::{
  Error, Result,
  error::{EntityKind, Resource},
  exists,
  store::Repository,
};

/// Resolve every resource to its restaurant and require that they agree.
/// Returns the shared restaurant id.
pub fn same_restaurant(repo: &dyn Repository, resources: &[Resource]) -> Result<i64> {
  let owners = resources
    .iter()
    .map(|r| exists::restaurant_of(repo, *r))
    .collect::<Result<Vec<_>>>()?;

  match owners.split_first() {
    None => Err(Error::Invalid("no resources to compare".into())),
    Some((first, rest)) if rest.iter().all(|id| id == first) => Ok(*first),
    Some(_) => Err(Error::NotSameRestaurant(resources.to_vec())),
  }
}

pub fn category_and_group_match(
  repo: &dyn Repository,
  category_id: i64,
  cat_group_id: i64,
) -> Result<i64> {
  same_restaurant(repo, &[
    Resource::new(EntityKind::Category, category_id),
    Resource::new(EntityKind::CategoryGroup, cat_group_id),
  ])
}

pub fn cat_group_and_restaurant_match(
  repo: &dyn Repository,
  cat_group_id: i64,
  restaurant_id: i64,
) -> Result<i64> {
  same_restaurant(repo, &[
    Resource::new(EntityKind::CategoryGroup, cat_group_id),
    Resource::new(EntityKind::Restaurant, restaurant_id),
  ])
}

pub fn category_and_meal_period_match(
  repo: &dyn Repository,
  category_id: i64,
  meal_period_id: i64,
) -> Result<i64> {
  same_restaurant(repo, &[
    Resource::new(EntityKind::Category, category_id),
    Resource::new(EntityKind::MealPeriod, meal_period_id),
  ])
}

pub fn invoice_and_category_match(
  repo: &dyn Repository,
  invoice_id: i64,
  category_id: i64,
) -> Result<i64> {
  same_restaurant(repo, &[
    Resource::new(EntityKind::Invoice, invoice_id),
    Resource::new(EntityKind::Category, category_id),
  ])
}

pub fn expense_invoice_category_match(
  repo: &dyn Repository,
  expense_id: i64,
  invoice_id: i64,
  category_id: i64,
) -> Result<i64> {
  same_restaurant(repo, &[
    Resource::new(EntityKind::Expense, expense_id),
    Resource::new(EntityKind::Invoice, invoice_id),
    Resource::new(EntityKind::Category, category_id),
  ])
}
