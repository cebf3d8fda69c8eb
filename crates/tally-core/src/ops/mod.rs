//! Typed operations.
//!
//! Each public operation takes the repository of the current unit of work,
//! the acting user's id and a typed input, and runs in a fixed order: access
//! oracle, existence and consistency checks, uniqueness, then the mutation.
//! The crate-private `create` functions skip the access check; they are shared
//! with the bootstrap orchestrator.

use rust_decimal::Decimal;

use crate::{Error, Result, error::EntityKind};

pub mod allocations;
pub mod cat_groups;
pub mod categories;
pub mod default_sales;
pub mod expenses;
pub mod invoices;
pub mod meal_periods;
pub mod restaurants;
pub mod sales;
pub mod users;

/// Fail with `Duplicate` if a row already holds the unique key.
fn unique<T>(existing: Option<T>, message: impl FnOnce() -> String) -> Result<()> {
  match existing {
    Some(_) => Err(Error::Duplicate(message())),
    None => Ok(()),
  }
}

/// Require a fraction in `[0, 1]`.
fn fraction(field: &str, value: Decimal) -> Result<Decimal> {
  if value.is_sign_negative() || value > Decimal::ONE {
    return Err(Error::Invalid(format!(
      "{field} must be between 0 and 1, got {value}"
    )));
  }
  Ok(value)
}

fn non_negative(field: &str, value: Decimal) -> Result<Decimal> {
  if value.is_sign_negative() {
    return Err(Error::Invalid(format!("{field} cannot be negative, got {value}")));
  }
  Ok(value)
}

/// The stored row after an update. A row that vanished between the read and
/// the write reports as missing.
fn updated<T>(row: Option<T>, kind: EntityKind, id: i64) -> Result<T> {
  row.ok_or_else(|| Error::not_found(kind, id))
}

fn deleted(removed: bool, kind: EntityKind, id: i64) -> Result<()> {
  if removed { Ok(()) } else { Err(Error::not_found(kind, id)) }
}
