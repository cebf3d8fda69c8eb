//! Category groups.

use super::{deleted, unique, updated};
use crate::{
  Result,
  access::{self, Role},
  error::{Action, EntityKind, Resource},
  exists,
  model::{CategoryGroup, CategoryGroupUpdate, NewCategoryGroup},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::CategoryGroup, id) }

fn taken(repo: &dyn Repository, restaurant_id: i64, name: &str) -> Result<()> {
  unique(repo.find_cat_group(restaurant_id, name)?, || {
    format!(
      "{name} is already a category group name for restaurant {restaurant_id}"
    )
  })
}

pub(crate) fn create(
  repo: &dyn Repository,
  new: &NewCategoryGroup,
) -> Result<CategoryGroup> {
  exists::restaurant(repo, new.restaurant_id)?.require()?;
  taken(repo, new.restaurant_id, &new.name)?;
  repo.insert_cat_group(new)
}

pub fn register(
  repo: &dyn Repository,
  actor: i64,
  new: &NewCategoryGroup,
) -> Result<CategoryGroup> {
  access::require_admin(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    Resource::new(EntityKind::Restaurant, new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<CategoryGroup> {
  let group = exists::cat_group(repo, id)?.require()?;
  access::require_member(repo, group.restaurant_id, actor, Action::View, resource(id))?;
  Ok(group)
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<CategoryGroup>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    Resource::new(EntityKind::Restaurant, restaurant_id),
  )?;
  repo.list_cat_groups(restaurant_id)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: CategoryGroupUpdate,
) -> Result<CategoryGroup> {
  let current = exists::cat_group(repo, id)?.require()?;
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

  let group = CategoryGroup {
    name: update.name.unwrap_or(current.name),
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_cat_group(&group)?, EntityKind::CategoryGroup, id)
}

/// Delete a group. Its categories stay, ungrouped.
pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Admin, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_cat_group(id)?, EntityKind::CategoryGroup, id)
}
