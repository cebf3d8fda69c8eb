//! Accounts and the authentication gate.

use super::{deleted, unique, updated};
use crate::{
  Error, Result,
  error::{Action, EntityKind, Resource},
  exists,
  model::{MemberRestaurant, NewUser, User, UserProfile, UserUpdate},
  store::Repository,
};

/// Create an account. Email addresses are unique across the store.
pub fn register(repo: &dyn Repository, new: &NewUser) -> Result<User> {
  unique(repo.find_user_by_email(&new.email_address)?, || {
    format!(
      "the email address {} is already associated with an existing account",
      new.email_address
    )
  })?;
  repo.insert_user(new)
}

/// Check an email/password pair. Both an unknown address and a wrong password
/// fail with the same [`Error::InvalidCredentials`].
///
/// `verify(password, stored_hash)` is supplied by the caller so that this
/// crate stays free of any particular hashing scheme.
pub fn authenticate(
  repo: &dyn Repository,
  email_address: &str,
  password: &str,
  verify: impl FnOnce(&str, &str) -> bool,
) -> Result<User> {
  let Some(credentials) = repo.find_user_by_email(email_address)? else {
    return Err(Error::InvalidCredentials);
  };
  if verify(password, &credentials.password_hash) {
    Ok(credentials.user)
  } else {
    Err(Error::InvalidCredentials)
  }
}

/// Users may only see and change their own account.
fn require_self(actor: i64, id: i64, action: Action) -> Result<()> {
  if actor == id {
    return Ok(());
  }
  Err(Error::Unauthorized {
    user_id: actor,
    action,
    resource: Resource::new(EntityKind::User, id),
  })
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<UserProfile> {
  require_self(actor, id, Action::View)?;
  let user = exists::user(repo, id)?.require()?;

  let mut restaurants = Vec::new();
  for membership in repo.list_user_memberships(id)? {
    let restaurant =
      exists::restaurant(repo, membership.restaurant_id)?.require()?;
    restaurants.push(MemberRestaurant {
      restaurant,
      is_admin: membership.is_admin,
    });
  }

  Ok(UserProfile { user, restaurants })
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: UserUpdate,
) -> Result<User> {
  require_self(actor, id, Action::Update)?;
  let current = exists::user(repo, id)?.require()?;

  if let Some(email) = update
    .email_address
    .as_ref()
    .filter(|email| **email != current.email_address)
  {
    unique(repo.find_user_by_email(email)?, || {
      format!(
        "the email address {email} is already associated with an existing \
         account"
      )
    })?;
  }

  let user = User {
    id,
    email_address: update.email_address.unwrap_or(current.email_address),
    first_name:    update.first_name.unwrap_or(current.first_name),
    last_name:     update.last_name.unwrap_or(current.last_name),
  };
  updated(
    repo.update_user(&user, update.password_hash.as_deref())?,
    EntityKind::User,
    id,
  )
}

/// Delete an account. Memberships and restaurants the user owns go with it.
pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  require_self(actor, id, Action::Delete)?;
  deleted(repo.delete_user(id)?, EntityKind::User, id)
}
