//! Categories and their optional group.
//!
//! A category's group must belong to the category's restaurant; the check
//! runs on creation and again whenever the group changes.

use super::{deleted, fraction, unique, updated};
use crate::{
  Result,
  access::{self, Role},
  consistency,
  error::{Action, EntityKind, Resource},
  exists,
  model::{Category, CategoryDetail, CategoryUpdate, NewCategory},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::Category, id) }

fn taken(repo: &dyn Repository, restaurant_id: i64, name: &str) -> Result<()> {
  unique(repo.find_category(restaurant_id, name)?, || {
    format!("{name} is already a category name for restaurant {restaurant_id}")
  })
}

pub(crate) fn create(repo: &dyn Repository, new: &NewCategory) -> Result<Category> {
  exists::restaurant(repo, new.restaurant_id)?.require()?;
  if let Some(group_id) = new.cat_group_id {
    consistency::cat_group_and_restaurant_match(repo, group_id, new.restaurant_id)?;
  }
  fraction("cogsPercent", new.cogs_percent)?;
  taken(repo, new.restaurant_id, &new.name)?;
  repo.insert_category(new)
}

pub fn register(repo: &dyn Repository, actor: i64, new: &NewCategory) -> Result<Category> {
  access::require_admin(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<CategoryDetail> {
  let category = exists::category(repo, id)?.require()?;
  access::require_member(
    repo,
    category.restaurant_id,
    actor,
    Action::View,
    resource(id),
  )?;

  let restaurant = exists::restaurant(repo, category.restaurant_id)?.require()?;
  let cat_group_name = match category.cat_group_id {
    Some(group_id) => exists::cat_group(repo, group_id)?.found().map(|g| g.name),
    None => None,
  };

  Ok(CategoryDetail {
    category,
    restaurant_name: restaurant.name,
    cat_group_name,
  })
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<Category>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    Resource::new(EntityKind::Restaurant, restaurant_id),
  )?;
  repo.list_categories(restaurant_id)
}

pub fn list_for_group(
  repo: &dyn Repository,
  actor: i64,
  cat_group_id: i64,
) -> Result<Vec<Category>> {
  access::authorize(
    repo,
    Role::Member,
    actor,
    Action::View,
    Resource::new(EntityKind::CategoryGroup, cat_group_id),
  )?;
  repo.list_group_categories(cat_group_id)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: CategoryUpdate,
) -> Result<Category> {
  let current = exists::category(repo, id)?.require()?;
  access::require_admin(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  let cat_group_id = match update.cat_group_id {
    None => current.cat_group_id,
    Some(None) => None,
    Some(Some(group_id)) => {
      consistency::category_and_group_match(repo, id, group_id)?;
      Some(group_id)
    }
  };
  if let Some(name) = update.name.as_ref().filter(|n| **n != current.name) {
    taken(repo, current.restaurant_id, name)?;
  }
  let cogs_percent = match update.cogs_percent {
    Some(value) => fraction("cogsPercent", value)?,
    None => current.cogs_percent,
  };

  let category = Category {
    name: update.name.unwrap_or(current.name),
    cat_group_id,
    cogs_percent,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_category(&category)?, EntityKind::Category, id)
}

/// Move a category into another group; a `cat_group_id` of 0 clears it.
pub fn change_group(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  cat_group_id: i64,
) -> Result<Category> {
  let group = (cat_group_id != 0).then_some(cat_group_id);
  update(repo, actor, id, CategoryUpdate {
    cat_group_id: Some(group),
    ..Default::default()
  })
}

pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Admin, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_category(id)?, EntityKind::Category, id)
}
