//! Encoding and decoding helpers between Tally domain types and the plain-text
//! representations stored in SQLite columns, plus one row mapper per table.
//!
//! Decimals are stored as their canonical string form so no precision is lost
//! to SQLite's REAL affinity. Dates are stored as `YYYY-MM-DD`. Each mapper
//! reads columns positionally, in the order given by the matching `*_COLUMNS`
//! constant.

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{Row, types::Type};
use rust_decimal::Decimal;
use tally_core::model::{
  Category, CategoryGroup, DayOfWeek, DefaultSale, Expense, Invoice,
  MealPeriod, MealPeriodCategory, Restaurant, RestaurantUser, Sale, User,
  UserCredentials,
};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_decimal(d: Decimal) -> String { d.normalize().to_string() }

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

/// Parse a TEXT column, reporting failures the way rusqlite reports any other
/// conversion error.
fn parse<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let raw: String = row.get(idx)?;
  raw
    .parse()
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_opt<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let raw: Option<String> = row.get(idx)?;
  raw
    .map(|s| {
      s.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
      })
    })
    .transpose()
}

// ─── Users & restaurants ─────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "id, email_address, first_name, last_name";

pub fn user(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    email_address: row.get(1)?,
    first_name:    row.get(2)?,
    last_name:     row.get(3)?,
  })
}

pub const CREDENTIAL_COLUMNS: &str =
  "id, email_address, first_name, last_name, password_hash";

pub fn credentials(row: &Row<'_>) -> rusqlite::Result<UserCredentials> {
  Ok(UserCredentials {
    user:          user(row)?,
    password_hash: row.get(4)?,
  })
}

pub const RESTAURANT_COLUMNS: &str =
  "id, owner_id, name, address, phone, email, website, notes";

pub fn restaurant(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
  Ok(Restaurant {
    id:       row.get(0)?,
    owner_id: row.get(1)?,
    name:     row.get(2)?,
    address:  row.get(3)?,
    phone:    row.get(4)?,
    email:    row.get(5)?,
    website:  row.get(6)?,
    notes:    row.get(7)?,
  })
}

pub const MEMBERSHIP_COLUMNS: &str = "restaurant_id, user_id, is_admin";

pub fn membership(row: &Row<'_>) -> rusqlite::Result<RestaurantUser> {
  Ok(RestaurantUser {
    restaurant_id: row.get(0)?,
    user_id:       row.get(1)?,
    is_admin:      row.get(2)?,
  })
}

// ─── Taxonomy ────────────────────────────────────────────────────────────────

pub const CAT_GROUP_COLUMNS: &str = "id, restaurant_id, name, notes";

pub fn cat_group(row: &Row<'_>) -> rusqlite::Result<CategoryGroup> {
  Ok(CategoryGroup {
    id:            row.get(0)?,
    restaurant_id: row.get(1)?,
    name:          row.get(2)?,
    notes:         row.get(3)?,
  })
}

pub const CATEGORY_COLUMNS: &str =
  "id, restaurant_id, name, cat_group_id, cogs_percent, notes";

pub fn category(row: &Row<'_>) -> rusqlite::Result<Category> {
  Ok(Category {
    id:            row.get(0)?,
    restaurant_id: row.get(1)?,
    name:          row.get(2)?,
    cat_group_id:  row.get(3)?,
    cogs_percent:  parse(row, 4)?,
    notes:         row.get(5)?,
  })
}

pub const MEAL_PERIOD_COLUMNS: &str = "id, restaurant_id, name, notes";

pub fn meal_period(row: &Row<'_>) -> rusqlite::Result<MealPeriod> {
  Ok(MealPeriod {
    id:            row.get(0)?,
    restaurant_id: row.get(1)?,
    name:          row.get(2)?,
    notes:         row.get(3)?,
  })
}

pub const ALLOCATION_COLUMNS: &str =
  "id, restaurant_id, meal_period_id, category_id, sales_percent_of_period, notes";

pub fn allocation(row: &Row<'_>) -> rusqlite::Result<MealPeriodCategory> {
  Ok(MealPeriodCategory {
    id:                      row.get(0)?,
    restaurant_id:           row.get(1)?,
    meal_period_id:          row.get(2)?,
    category_id:             row.get(3)?,
    sales_percent_of_period: parse(row, 4)?,
    notes:                   row.get(5)?,
  })
}

// ─── Sales ───────────────────────────────────────────────────────────────────

pub const DAY_COLUMNS: &str = "id, name";

pub fn day(row: &Row<'_>) -> rusqlite::Result<DayOfWeek> {
  Ok(DayOfWeek {
    id:   row.get(0)?,
    name: row.get(1)?,
  })
}

pub const DEFAULT_SALE_COLUMNS: &str =
  "id, restaurant_id, meal_period_id, day_id, total, notes";

pub fn default_sale(row: &Row<'_>) -> rusqlite::Result<DefaultSale> {
  Ok(DefaultSale {
    id:             row.get(0)?,
    restaurant_id:  row.get(1)?,
    meal_period_id: row.get(2)?,
    day_id:         row.get(3)?,
    total:          parse(row, 4)?,
    notes:          row.get(5)?,
  })
}

pub const SALE_COLUMNS: &str = "id, restaurant_id, meal_period_category_id, \
                                date, expected_sales, actual_sales, notes";

pub fn sale(row: &Row<'_>) -> rusqlite::Result<Sale> {
  Ok(Sale {
    id:                 row.get(0)?,
    restaurant_id:      row.get(1)?,
    meal_period_cat_id: row.get(2)?,
    date:               parse(row, 3)?,
    expected_sales:     parse(row, 4)?,
    actual_sales:       parse_opt(row, 5)?,
    notes:              row.get(6)?,
  })
}

// ─── Purchasing ──────────────────────────────────────────────────────────────

pub const INVOICE_COLUMNS: &str =
  "id, restaurant_id, date, invoice, vendor, total, notes";

pub fn invoice(row: &Row<'_>) -> rusqlite::Result<Invoice> {
  Ok(Invoice {
    id:            row.get(0)?,
    restaurant_id: row.get(1)?,
    date:          parse(row, 2)?,
    invoice:       row.get(3)?,
    vendor:        row.get(4)?,
    total:         parse(row, 5)?,
    notes:         row.get(6)?,
  })
}

pub const EXPENSE_COLUMNS: &str =
  "id, restaurant_id, category_id, invoice_id, amount, notes";

pub fn expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
  Ok(Expense {
    id:            row.get(0)?,
    restaurant_id: row.get(1)?,
    category_id:   row.get(2)?,
    invoice_id:    row.get(3)?,
    amount:        parse(row, 4)?,
    notes:         row.get(5)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decimals_are_stored_without_trailing_zeros() {
    assert_eq!(encode_decimal(Decimal::new(1000, 2)), "10");
    assert_eq!(encode_decimal(Decimal::new(35, 2)), "0.35");
  }

  #[test]
  fn dates_are_iso() {
    let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(encode_date(d), "2024-03-09");
    assert_eq!("2024-03-09".parse::<NaiveDate>().unwrap(), d);
  }
}
