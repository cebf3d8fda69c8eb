//! Restaurant lifecycle and membership invariants.
//!
//! A restaurant never exists without its owner's admin membership: both rows
//! are written by [`register`] inside the caller's unit of work. The owner's
//! membership can never be demoted or removed, by anyone.

use tracing::info;

use super::{deleted, unique, updated};
use crate::{
  Error, Result,
  access,
  bootstrap::{self, SeedSummary},
  error::{Action, EntityKind, Resource},
  exists,
  model::{
    NewRestaurant, Restaurant, RestaurantDetail, RestaurantUpdate,
    RestaurantUser,
  },
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::Restaurant, id) }

/// Insert a restaurant owned by `owner_id` and the owner's admin membership.
pub fn register(
  repo: &dyn Repository,
  owner_id: i64,
  fields: &NewRestaurant,
) -> Result<Restaurant> {
  exists::user(repo, owner_id)?.require()?;
  let restaurant = repo.insert_restaurant(owner_id, fields)?;
  repo.insert_membership(&RestaurantUser {
    restaurant_id: restaurant.id,
    user_id:       owner_id,
    is_admin:      true,
  })?;
  Ok(restaurant)
}

/// [`register`], then seed the restaurant with the standard template.
pub fn register_with_defaults(
  repo: &dyn Repository,
  owner_id: i64,
  fields: &NewRestaurant,
) -> Result<(Restaurant, SeedSummary)> {
  let restaurant = register(repo, owner_id, fields)?;
  let summary = bootstrap::seed(repo, restaurant.id)?;
  info!(
    restaurant_id = restaurant.id,
    owner_id,
    categories = summary.categories.len(),
    allocations = summary.allocations.len(),
    "seeded new restaurant"
  );
  Ok((restaurant, summary))
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<RestaurantDetail> {
  access::require_member(repo, id, actor, Action::View, resource(id))?;
  let restaurant = exists::restaurant(repo, id)?.require()?;

  let users = repo.list_memberships(id)?;
  let is_admin = users.iter().any(|m| m.user_id == actor && m.is_admin);
  let is_owner = restaurant.owner_id == actor;

  Ok(RestaurantDetail {
    users,
    meal_periods: repo.list_meal_periods(id)?,
    categories: repo.list_categories(id)?,
    cat_groups: repo.list_cat_groups(id)?,
    meal_period_categories: repo.list_allocations(id)?,
    invoices: repo.list_invoices(id)?,
    expenses: repo.list_expenses(id)?,
    default_sales: repo.list_default_sales(id)?,
    is_admin,
    is_owner,
    restaurant,
  })
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: RestaurantUpdate,
) -> Result<Restaurant> {
  access::require_admin(repo, id, actor, Action::Update, resource(id))?;
  let current = exists::restaurant(repo, id)?.require()?;

  let restaurant = Restaurant {
    id,
    owner_id: current.owner_id,
    name: update.name.unwrap_or(current.name),
    address: update.address.or(current.address),
    phone: update.phone.or(current.phone),
    email: update.email.or(current.email),
    website: update.website.or(current.website),
    notes: update.notes.unwrap_or(current.notes),
  };
  updated(
    repo.update_restaurant(&restaurant)?,
    EntityKind::Restaurant,
    id,
  )
}

/// Delete a restaurant and, by cascade, everything scoped to it.
pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::require_admin(repo, id, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_restaurant(id)?, EntityKind::Restaurant, id)
}

// ─── Membership ──────────────────────────────────────────────────────────────

/// Fail with [`Error::OwnerMembership`] if `user_id` owns the restaurant.
/// The owner is re-read on every call.
fn guard_owner(repo: &dyn Repository, restaurant_id: i64, user_id: i64) -> Result<()> {
  let restaurant = exists::restaurant(repo, restaurant_id)?.require()?;
  if restaurant.owner_id == user_id {
    return Err(Error::OwnerMembership);
  }
  Ok(())
}

fn membership(
  repo: &dyn Repository,
  restaurant_id: i64,
  user_id: i64,
) -> Result<RestaurantUser> {
  repo
    .get_membership(restaurant_id, user_id)?
    .ok_or(Error::MembershipNotFound { restaurant_id, user_id })
}

/// Grant `user_id` access to a restaurant. Admins only.
pub fn add_member(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  user_id: i64,
  is_admin: bool,
) -> Result<RestaurantUser> {
  access::require_admin(
    repo,
    restaurant_id,
    actor,
    Action::Create,
    resource(restaurant_id),
  )?;
  exists::user(repo, user_id)?.require()?;
  unique(repo.get_membership(restaurant_id, user_id)?, || {
    format!("user {user_id} is already associated with restaurant {restaurant_id}")
  })?;
  repo.insert_membership(&RestaurantUser {
    restaurant_id,
    user_id,
    is_admin,
  })
}

/// Promote or demote a member. Admins only; never applies to the owner.
pub fn update_member(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  user_id: i64,
  is_admin: bool,
) -> Result<RestaurantUser> {
  guard_owner(repo, restaurant_id, user_id)?;
  access::require_admin(
    repo,
    restaurant_id,
    actor,
    Action::Update,
    resource(restaurant_id),
  )?;
  let current = membership(repo, restaurant_id, user_id)?;
  repo
    .update_membership(&RestaurantUser { is_admin, ..current })?
    .ok_or(Error::MembershipNotFound { restaurant_id, user_id })
}

/// Revoke a membership. Admins may remove anyone but the owner; any member
/// may remove themself.
pub fn remove_member(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  user_id: i64,
) -> Result<()> {
  guard_owner(repo, restaurant_id, user_id)?;
  if actor != user_id {
    access::require_admin(
      repo,
      restaurant_id,
      actor,
      Action::Delete,
      resource(restaurant_id),
    )?;
  }
  membership(repo, restaurant_id, user_id)?;
  if repo.delete_membership(restaurant_id, user_id)? {
    Ok(())
  } else {
    Err(Error::MembershipNotFound { restaurant_id, user_id })
  }
}
