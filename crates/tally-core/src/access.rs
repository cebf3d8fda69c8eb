//! The access-control oracle.
//!
//! Both predicates are stateless reads over membership rows; nothing is
//! cached, so every decision reflects the store as of the current unit of
//! work.

use crate::{
  Error, Result,
  error::{Action, Resource},
  exists,
  store::Repository,
};

/// The privilege an operation needs on a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Member,
  Admin,
}

/// Whether `user_id` has a membership row for `restaurant_id`.
///
/// Fails with `NotFound` if either the restaurant or the user does not
/// exist, which is distinct from "not a member".
pub fn is_member(repo: &dyn Repository, restaurant_id: i64, user_id: i64) -> Result<bool> {
  exists::restaurant(repo, restaurant_id)?.require()?;
  exists::user(repo, user_id)?.require()?;
  Ok(repo.get_membership(restaurant_id, user_id)?.is_some())
}

/// Whether `user_id` has a membership row for `restaurant_id` with the admin
/// flag set. Implies [`is_member`].
pub fn is_admin(repo: &dyn Repository, restaurant_id: i64, user_id: i64) -> Result<bool> {
  exists::restaurant(repo, restaurant_id)?.require()?;
  exists::user(repo, user_id)?.require()?;
  Ok(
    repo
      .get_membership(restaurant_id, user_id)?
      .is_some_and(|m| m.is_admin),
  )
}

pub fn require(
  repo: &dyn Repository,
  role: Role,
  restaurant_id: i64,
  user_id: i64,
  action: Action,
  resource: Resource,
) -> Result<()> {
  let allowed = match role {
    Role::Member => is_member(repo, restaurant_id, user_id)?,
    Role::Admin => is_admin(repo, restaurant_id, user_id)?,
  };
  if allowed {
    Ok(())
  } else {
    Err(Error::Unauthorized { user_id, action, resource })
  }
}

pub fn require_member(
  repo: &dyn Repository,
  restaurant_id: i64,
  user_id: i64,
  action: Action,
  resource: Resource,
) -> Result<()> {
  require(repo, Role::Member, restaurant_id, user_id, action, resource)
}

pub fn require_admin(
  repo: &dyn Repository,
  restaurant_id: i64,
  user_id: i64,
  action: Action,
  resource: Resource,
) -> Result<()> {
  require(repo, Role::Admin, restaurant_id, user_id, action, resource)
}

/// Resolve `resource` to its restaurant, then require `role` there. Returns
/// the restaurant id.
pub fn authorize(
  repo: &dyn Repository,
  role: Role,
  user_id: i64,
  action: Action,
  resource: Resource,
) -> Result<i64> {
  let restaurant_id = exists::restaurant_of(repo, resource)?;
  require(repo, role, restaurant_id, user_id, action, resource)?;
  Ok(restaurant_id)
}
