//! Sale records: expected and actual sales for one allocation on one date.

use chrono::NaiveDate;

use super::{deleted, non_negative, unique, updated};
use crate::{
  Result,
  access::{self, Role},
  consistency,
  error::{Action, EntityKind, Resource},
  exists,
  model::{NewSale, Sale, SaleUpdate},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::Sale, id) }

fn restaurant(id: i64) -> Resource { Resource::new(EntityKind::Restaurant, id) }

pub(crate) fn create(repo: &dyn Repository, new: &NewSale) -> Result<Sale> {
  consistency::same_restaurant(repo, &[
    restaurant(new.restaurant_id),
    Resource::new(EntityKind::MealPeriodCategory, new.meal_period_cat_id),
  ])?;
  non_negative("expectedSales", new.expected_sales)?;
  if let Some(actual) = new.actual_sales {
    non_negative("actualSales", actual)?;
  }
  unique(
    repo.find_sale(new.restaurant_id, new.meal_period_cat_id, new.date)?,
    || {
      format!(
        "a sales record for meal period category {} already exists for \
         restaurant {} on {}",
        new.meal_period_cat_id, new.restaurant_id, new.date
      )
    },
  )?;
  repo.insert_sale(new)
}

pub fn register(repo: &dyn Repository, actor: i64, new: &NewSale) -> Result<Sale> {
  access::require_member(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    restaurant(new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<Sale> {
  let sale = exists::sale(repo, id)?.require()?;
  access::require_member(repo, sale.restaurant_id, actor, Action::View, resource(id))?;
  Ok(sale)
}

/// Every sale record of a restaurant on `date`.
pub fn list_on(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  date: NaiveDate,
) -> Result<Vec<Sale>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    restaurant(restaurant_id),
  )?;
  repo.list_sales_on(restaurant_id, date)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: SaleUpdate,
) -> Result<Sale> {
  let current = exists::sale(repo, id)?.require()?;
  access::require_member(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  let expected_sales = match update.expected_sales {
    Some(value) => non_negative("expectedSales", value)?,
    None => current.expected_sales,
  };
  let actual_sales = match update.actual_sales {
    Some(Some(value)) => Some(non_negative("actualSales", value)?),
    Some(None) => None,
    None => current.actual_sales,
  };
  let sale = Sale {
    expected_sales,
    actual_sales,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_sale(&sale)?, EntityKind::Sale, id)
}

pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Member, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_sale(id)?, EntityKind::Sale, id)
}
