//! Vendor invoices.

use chrono::NaiveDate;

use super::{deleted, non_negative, unique, updated};
use crate::{
  Error, Result,
  access::{self, Role},
  error::{Action, EntityKind, Resource},
  exists,
  model::{Invoice, InvoiceUpdate, NewInvoice},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::Invoice, id) }

fn restaurant(id: i64) -> Resource { Resource::new(EntityKind::Restaurant, id) }

fn taken(
  repo: &dyn Repository,
  restaurant_id: i64,
  vendor: &str,
  invoice: &str,
) -> Result<()> {
  unique(repo.find_invoice(restaurant_id, vendor, invoice)?, || {
    format!(
      "invoice {invoice} from {vendor} already exists for restaurant \
       {restaurant_id}"
    )
  })
}

/// Reject an inverted range.
pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
  if start > end {
    return Err(Error::Invalid(format!(
      "start date {start} is after end date {end}"
    )));
  }
  Ok(())
}

pub(crate) fn create(repo: &dyn Repository, new: &NewInvoice) -> Result<Invoice> {
  exists::restaurant(repo, new.restaurant_id)?.require()?;
  non_negative("total", new.total)?;
  taken(repo, new.restaurant_id, &new.vendor, &new.invoice)?;
  repo.insert_invoice(new)
}

pub fn register(repo: &dyn Repository, actor: i64, new: &NewInvoice) -> Result<Invoice> {
  access::require_member(
    repo,
    new.restaurant_id,
    actor,
    Action::Create,
    restaurant(new.restaurant_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<Invoice> {
  let invoice = exists::invoice(repo, id)?.require()?;
  access::require_member(
    repo,
    invoice.restaurant_id,
    actor,
    Action::View,
    resource(id),
  )?;
  Ok(invoice)
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<Invoice>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    restaurant(restaurant_id),
  )?;
  repo.list_invoices(restaurant_id)
}

/// Invoices dated from `start` through `end`, inclusive.
pub fn list_between(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  start: NaiveDate,
  end: NaiveDate,
) -> Result<Vec<Invoice>> {
  check_range(start, end)?;
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    restaurant(restaurant_id),
  )?;
  repo.list_invoices_between(restaurant_id, start, end)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: InvoiceUpdate,
) -> Result<Invoice> {
  let current = exists::invoice(repo, id)?.require()?;
  access::require_member(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  let vendor = update.vendor.unwrap_or_else(|| current.vendor.clone());
  let number = update.invoice.unwrap_or_else(|| current.invoice.clone());
  if vendor != current.vendor || number != current.invoice {
    taken(repo, current.restaurant_id, &vendor, &number)?;
  }
  let total = match update.total {
    Some(total) => non_negative("total", total)?,
    None => current.total,
  };

  let invoice = Invoice {
    date: update.date.unwrap_or(current.date),
    invoice: number,
    vendor,
    total,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_invoice(&invoice)?, EntityKind::Invoice, id)
}

/// Delete an invoice and its expenses.
pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Member, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_invoice(id)?, EntityKind::Invoice, id)
}
