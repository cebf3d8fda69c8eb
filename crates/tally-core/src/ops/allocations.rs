//! Meal period / category allocations: the share of a meal period's sales
//! expected to land in each category. Addressed by the
//! `(meal_period_id, category_id)` pair.

use super::{fraction, unique, updated};
use crate::{
  Error, Result,
  access,
  consistency,
  error::{Action, EntityKind, Resource},
  model::{
    AllocationFields, AllocationUpdate, MealPeriodCategory,
    NewMealPeriodCategory,
  },
  store::Repository,
};

fn resource(meal_period_id: i64) -> Resource {
  Resource::new(EntityKind::MealPeriod, meal_period_id)
}

pub(crate) fn create(
  repo: &dyn Repository,
  new: &NewMealPeriodCategory,
) -> Result<MealPeriodCategory> {
  consistency::same_restaurant(repo, &[
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
    Resource::new(EntityKind::MealPeriod, new.meal_period_id),
    Resource::new(EntityKind::Category, new.category_id),
  ])?;
  fraction("salesPercentOfPeriod", new.sales_percent_of_period)?;
  unique(
    repo.find_allocation(new.meal_period_id, new.category_id)?,
    || {
      format!(
        "meal period {} and category {} association already exists",
        new.meal_period_id, new.category_id
      )
    },
  )?;
  repo.insert_allocation(new)
}

/// The allocation for a pair; callers have already resolved both ids.
fn find(
  repo: &dyn Repository,
  meal_period_id: i64,
  category_id: i64,
) -> Result<MealPeriodCategory> {
  repo.find_allocation(meal_period_id, category_id)?.ok_or(
    Error::AllocationNotFound {
      meal_period_id,
      category_id,
    },
  )
}

pub fn register(
  repo: &dyn Repository,
  actor: i64,
  meal_period_id: i64,
  category_id: i64,
  fields: AllocationFields,
) -> Result<MealPeriodCategory> {
  let restaurant_id =
    consistency::category_and_meal_period_match(repo, category_id, meal_period_id)?;
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::Create,
    resource(meal_period_id),
  )?;
  create(repo, &NewMealPeriodCategory {
    restaurant_id,
    meal_period_id,
    category_id,
    sales_percent_of_period: fields.sales_percent_of_period,
    notes: fields.notes,
  })
}

pub fn get(
  repo: &dyn Repository,
  actor: i64,
  meal_period_id: i64,
  category_id: i64,
) -> Result<MealPeriodCategory> {
  let restaurant_id =
    consistency::category_and_meal_period_match(repo, category_id, meal_period_id)?;
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    resource(meal_period_id),
  )?;
  find(repo, meal_period_id, category_id)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  meal_period_id: i64,
  category_id: i64,
  update: AllocationUpdate,
) -> Result<MealPeriodCategory> {
  let restaurant_id =
    consistency::category_and_meal_period_match(repo, category_id, meal_period_id)?;
  access::require_admin(
    repo,
    restaurant_id,
    actor,
    Action::Update,
    resource(meal_period_id),
  )?;
  let current = find(repo, meal_period_id, category_id)?;

  let sales_percent_of_period = match update.sales_percent_of_period {
    Some(value) => fraction("salesPercentOfPeriod", value)?,
    None => current.sales_percent_of_period,
  };
  let allocation = MealPeriodCategory {
    sales_percent_of_period,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(
    repo.update_allocation(&allocation)?,
    EntityKind::MealPeriodCategory,
    allocation.id,
  )
}

pub fn delete(
  repo: &dyn Repository,
  actor: i64,
  meal_period_id: i64,
  category_id: i64,
) -> Result<()> {
  let restaurant_id =
    consistency::category_and_meal_period_match(repo, category_id, meal_period_id)?;
  access::require_admin(
    repo,
    restaurant_id,
    actor,
    Action::Delete,
    resource(meal_period_id),
  )?;
  let current = find(repo, meal_period_id, category_id)?;
  if repo.delete_allocation(current.id)? {
    Ok(())
  } else {
    Err(Error::AllocationNotFound {
      meal_period_id,
      category_id,
    })
  }
}
