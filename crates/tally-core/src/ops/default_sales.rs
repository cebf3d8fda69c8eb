//! Default sales: the baseline total expected for a meal period on a given
//! day of the week.

use super::{deleted, non_negative, unique, updated};
use crate::{
  Result,
  access::{self, Role},
  consistency,
  error::{Action, EntityKind, Resource},
  exists,
  model::{DefaultSale, DefaultSaleUpdate, NewDefaultSale},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::DefaultSale, id) }

pub(crate) fn create(repo: &dyn Repository, new: &NewDefaultSale) -> Result<DefaultSale> {
  exists::day(repo, new.day_id)?.require()?;
  consistency::same_restaurant(repo, &[
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
    Resource::new(EntityKind::MealPeriod, new.meal_period_id),
  ])?;
  non_negative("total", new.total)?;
  unique(
    repo.find_default_sale(new.restaurant_id, new.meal_period_id, new.day_id)?,
    || {
      format!(
        "a default sale entry for meal period {} already exists for \
         restaurant {} on day {}",
        new.meal_period_id, new.restaurant_id, new.day_id
      )
    },
  )?;
  repo.insert_default_sale(new)
}

pub fn register(
  repo: &dyn Repository,
  actor: i64,
  new: &NewDefaultSale,
) -> Result<DefaultSale> {
  access::require_member(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<DefaultSale> {
  let sale = exists::default_sale(repo, id)?.require()?;
  access::require_member(repo, sale.restaurant_id, actor, Action::View, resource(id))?;
  Ok(sale)
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<DefaultSale>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    Resource::new(EntityKind::Restaurant, restaurant_id),
  )?;
  repo.list_default_sales(restaurant_id)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: DefaultSaleUpdate,
) -> Result<DefaultSale> {
  let current = exists::default_sale(repo, id)?.require()?;
  access::require_admin(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  let total = match update.total {
    Some(total) => non_negative("total", total)?,
    None => current.total,
  };
  let sale = DefaultSale {
    total,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_default_sale(&sale)?, EntityKind::DefaultSale, id)
}

pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Admin, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_default_sale(id)?, EntityKind::DefaultSale, id)
}
