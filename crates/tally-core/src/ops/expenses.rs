//! Expenses: invoice lines charged to a category.
//!
//! An expense, its invoice and its category always resolve to the same
//! restaurant. Both foreign keys are mutable, so the check runs again on
//! every update that touches either.

use chrono::NaiveDate;

use super::{deleted, invoices::check_range, non_negative, updated};
use crate::{
  Result,
  access::{self, Role},
  consistency,
  error::{Action, EntityKind, Resource},
  exists,
  model::{Expense, ExpenseDetail, ExpenseUpdate, NewExpense},
  store::Repository,
};

fn resource(id: i64) -> Resource { Resource::new(EntityKind::Expense, id) }

fn restaurant(id: i64) -> Resource { Resource::new(EntityKind::Restaurant, id) }

pub(crate) fn create(repo: &dyn Repository, new: &NewExpense) -> Result<Expense> {
  consistency::same_restaurant(repo, &[
    restaurant(new.restaurant_id),
    Resource::new(EntityKind::Invoice, new.invoice_id),
    Resource::new(EntityKind::Category, new.category_id),
  ])?;
  non_negative("amount", new.amount)?;
  repo.insert_expense(new)
}

pub fn register(repo: &dyn Repository, actor: i64, new: &NewExpense) -> Result<Expense> {
  let restaurant_id =
    consistency::invoice_and_category_match(repo, new.invoice_id, new.category_id)?;
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::Create,
    Resource::new(EntityKind::Invoice, new.invoice_id),
  )?;
  create(repo, new)
}

pub fn get(repo: &dyn Repository, actor: i64, id: i64) -> Result<ExpenseDetail> {
  let expense = exists::expense(repo, id)?.require()?;
  access::require_member(
    repo,
    expense.restaurant_id,
    actor,
    Action::View,
    resource(id),
  )?;
  let invoice = exists::invoice(repo, expense.invoice_id)?.require()?;
  Ok(ExpenseDetail { expense, invoice })
}

pub fn list(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
) -> Result<Vec<Expense>> {
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    restaurant(restaurant_id),
  )?;
  repo.list_expenses(restaurant_id)
}

pub fn list_for_invoice(
  repo: &dyn Repository,
  actor: i64,
  invoice_id: i64,
) -> Result<Vec<Expense>> {
  access::authorize(
    repo,
    Role::Member,
    actor,
    Action::View,
    Resource::new(EntityKind::Invoice, invoice_id),
  )?;
  repo.list_invoice_expenses(invoice_id)
}

/// Expenses on invoices dated from `start` through `end`, inclusive.
pub fn list_between(
  repo: &dyn Repository,
  actor: i64,
  restaurant_id: i64,
  start: NaiveDate,
  end: NaiveDate,
) -> Result<Vec<Expense>> {
  check_range(start, end)?;
  access::require_member(
    repo,
    restaurant_id,
    actor,
    Action::View,
    restaurant(restaurant_id),
  )?;

  let mut expenses = Vec::new();
  for invoice in repo.list_invoices_between(restaurant_id, start, end)? {
    expenses.extend(repo.list_invoice_expenses(invoice.id)?);
  }
  Ok(expenses)
}

pub fn update(
  repo: &dyn Repository,
  actor: i64,
  id: i64,
  update: ExpenseUpdate,
) -> Result<Expense> {
  let current = exists::expense(repo, id)?.require()?;
  access::require_member(
    repo,
    current.restaurant_id,
    actor,
    Action::Update,
    resource(id),
  )?;

  let invoice_id = update.invoice_id.unwrap_or(current.invoice_id);
  let category_id = update.category_id.unwrap_or(current.category_id);
  if invoice_id != current.invoice_id || category_id != current.category_id {
    consistency::expense_invoice_category_match(repo, id, invoice_id, category_id)?;
  }
  let amount = match update.amount {
    Some(amount) => non_negative("amount", amount)?,
    None => current.amount,
  };

  let expense = Expense {
    invoice_id,
    category_id,
    amount,
    notes: update.notes.unwrap_or(current.notes),
    ..current
  };
  updated(repo.update_expense(&expense)?, EntityKind::Expense, id)
}

pub fn delete(repo: &dyn Repository, actor: i64, id: i64) -> Result<()> {
  access::authorize(repo, Role::Member, actor, Action::Delete, resource(id))?;
  deleted(repo.delete_expense(id)?, EntityKind::Expense, id)
}
