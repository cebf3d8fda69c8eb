//! Meal periods.

use super::{deleted, unique, updated};
use crate::{
  Result,
  access::{self, Role},
  error::{Action, EntityKind, Resource},
  exists,
  model::{MealPeriod, MealPeriodDetail, MealPeriodUpdate, NewMealPeriod},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::MealPeriod, id) }

fn taken(repo: &dyn Repository, restaurant_id: i64, name: &str) -> Result<()> {
  unique(repo.find_meal_period(restaurant_id, name)?, || {
    format!("{name} is already a meal period for restaurant {restaurant_id}")
  })
}

pub(crate) fn create(repo: &dyn Repository, new: &NewMealPeriod) -> Result<MealPeriod> {
  exists::restaurant(repo, new.restaurant_id)?.require()?;
  taken(repo, new.restaurant_id, &new.name)?;
  repo.insert_meal_period(new)
}

pub fn register(
  repo: &dyn Repository,
  actor: i64,
  new: &NewMealPeriod,
) -> Result<MealPeriod> {
  access::require_admin(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<MealPeriodDetail> {
  let meal_period = exists::meal_period(repo, id)?.require()?;
  access::require_member(
    repo,
    meal_period.restaurant_id,
    actor,
    Action::View,
    resource(id),
  )?;
  let restaurant = exists::restaurant(repo, meal_period.restaurant_id)?.require()?;
  Ok(MealPeriodDetail {
    meal_period,
    restaurant_name: restaurant.name,
  })
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<MealPeriod>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    Resource::new(EntityKind::Restaurant, restaurant_id),
  )?;
  repo.list_meal_periods(restaurant_id)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: MealPeriodUpdate,
) -> Result<MealPeriod> {
  let current = exists::meal_period(repo, id)?.require()?;
  access::require_admin(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  if let Some(name) = update.name.as_ref().filter(|n| **n != current.name) {
    taken(repo, current.restaurant_id, name)?;
  }

  let period = MealPeriod {
    name: update.name.unwrap_or(current.name),
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_meal_period(&period)?, EntityKind::MealPeriod, id)
}

/// Delete a meal period along with its allocations and default sales.
pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Admin, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_meal_period(id)?, EntityKind::MealPeriod, id)
}
