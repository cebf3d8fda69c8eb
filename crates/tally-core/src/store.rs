//! The `Repository` and `Store` traits.
//!
//! [`Repository`] is the point-CRUD surface every operation in this crate is
//! written against: get by primary key, get by unique key, insert returning
//! the row, update returning the row, delete reporting whether a row went
//! away. It is synchronous and object-safe so that a backend can hand out a
//! repository bound to an open transaction.
//!
//! [`Store`] is the async entry point. Each call to [`Store::read`] or
//! [`Store::write`] is one unit of work; a write commits only if the closure
//! returns `Ok`, so multi-row workflows (restaurant + owner membership,
//! restaurant bootstrap) are atomic.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  Result,
  model::{
    Category, CategoryGroup, DayOfWeek, DefaultSale, Expense, Invoice,
    MealPeriod, MealPeriodCategory, NewCategory, NewCategoryGroup,
    NewDefaultSale, NewExpense, NewInvoice, NewMealPeriod,
    NewMealPeriodCategory, NewRestaurant, NewSale, NewUser, Restaurant,
    RestaurantUser, Sale, User, UserCredentials,
  },
};

// ─── Repository ──────────────────────────────────────────────────────────────

/// Point reads and writes over the Tally tables.
///
/// `update_*` methods write every column of the given row (matched by `id`)
/// and return the stored row, or `None` if no row has that id. `delete_*`
/// methods return `false` if nothing was deleted.
pub trait Repository {
  // ── Users ───────────────────────────────────────────────────────────────
  fn insert_user(&self, user: &NewUser) -> Result<User>;
  fn get_user(&self, id: i64) -> Result<Option<User>>;
  fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
  /// `password_hash` of `None` keeps the stored hash.
  fn update_user(
    &self,
    user: &User,
    password_hash: Option<&str>,
  ) -> Result<Option<User>>;
  fn delete_user(&self, id: i64) -> Result<bool>;

  // ── Restaurants ─────────────────────────────────────────────────────────
  fn insert_restaurant(
    &self,
    owner_id: i64,
    fields: &NewRestaurant,
  ) -> Result<Restaurant>;
  fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>>;
  fn update_restaurant(&self, restaurant: &Restaurant) -> Result<Option<Restaurant>>;
  fn delete_restaurant(&self, id: i64) -> Result<bool>;

  // ── Memberships ─────────────────────────────────────────────────────────
  fn insert_membership(&self, membership: &RestaurantUser) -> Result<RestaurantUser>;
  fn get_membership(
    &self,
    restaurant_id: i64,
    user_id: i64,
  ) -> Result<Option<RestaurantUser>>;
  fn list_memberships(&self, restaurant_id: i64) -> Result<Vec<RestaurantUser>>;
  fn list_user_memberships(&self, user_id: i64) -> Result<Vec<RestaurantUser>>;
  fn update_membership(
    &self,
    membership: &RestaurantUser,
  ) -> Result<Option<RestaurantUser>>;
  fn delete_membership(&self, restaurant_id: i64, user_id: i64) -> Result<bool>;

  // ── Category groups ─────────────────────────────────────────────────────
  fn insert_cat_group(&self, group: &NewCategoryGroup) -> Result<CategoryGroup>;
  fn get_cat_group(&self, id: i64) -> Result<Option<CategoryGroup>>;
  fn find_cat_group(
    &self,
    restaurant_id: i64,
    name: &str,
  ) -> Result<Option<CategoryGroup>>;
  fn list_cat_groups(&self, restaurant_id: i64) -> Result<Vec<CategoryGroup>>;
  fn update_cat_group(&self, group: &CategoryGroup) -> Result<Option<CategoryGroup>>;
  fn delete_cat_group(&self, id: i64) -> Result<bool>;

  // ── Categories ──────────────────────────────────────────────────────────
  fn insert_category(&self, category: &NewCategory) -> Result<Category>;
  fn get_category(&self, id: i64) -> Result<Option<Category>>;
  fn find_category(&self, restaurant_id: i64, name: &str) -> Result<Option<Category>>;
  fn list_categories(&self, restaurant_id: i64) -> Result<Vec<Category>>;
  fn list_group_categories(&self, cat_group_id: i64) -> Result<Vec<Category>>;
  fn update_category(&self, category: &Category) -> Result<Option<Category>>;
  fn delete_category(&self, id: i64) -> Result<bool>;

  // ── Meal periods ────────────────────────────────────────────────────────
  fn insert_meal_period(&self, period: &NewMealPeriod) -> Result<MealPeriod>;
  fn get_meal_period(&self, id: i64) -> Result<Option<MealPeriod>>;
  fn find_meal_period(
    &self,
    restaurant_id: i64,
    name: &str,
  ) -> Result<Option<MealPeriod>>;
  fn list_meal_periods(&self, restaurant_id: i64) -> Result<Vec<MealPeriod>>;
  fn update_meal_period(&self, period: &MealPeriod) -> Result<Option<MealPeriod>>;
  fn delete_meal_period(&self, id: i64) -> Result<bool>;

  // ── Meal period / category allocations ──────────────────────────────────
  fn insert_allocation(
    &self,
    allocation: &NewMealPeriodCategory,
  ) -> Result<MealPeriodCategory>;
  fn get_allocation(&self, id: i64) -> Result<Option<MealPeriodCategory>>;
  fn find_allocation(
    &self,
    meal_period_id: i64,
    category_id: i64,
  ) -> Result<Option<MealPeriodCategory>>;
  fn list_allocations(&self, restaurant_id: i64) -> Result<Vec<MealPeriodCategory>>;
  fn update_allocation(
    &self,
    allocation: &MealPeriodCategory,
  ) -> Result<Option<MealPeriodCategory>>;
  fn delete_allocation(&self, id: i64) -> Result<bool>;

  // ── Days of the week ────────────────────────────────────────────────────
  fn get_day(&self, id: i64) -> Result<Option<DayOfWeek>>;

  // ── Default sales ───────────────────────────────────────────────────────
  fn insert_default_sale(&self, sale: &NewDefaultSale) -> Result<DefaultSale>;
  fn get_default_sale(&self, id: i64) -> Result<Option<DefaultSale>>;
  fn find_default_sale(
    &self,
    restaurant_id: i64,
    meal_period_id: i64,
    day_id: i64,
  ) -> Result<Option<DefaultSale>>;
  fn list_default_sales(&self, restaurant_id: i64) -> Result<Vec<DefaultSale>>;
  fn update_default_sale(&self, sale: &DefaultSale) -> Result<Option<DefaultSale>>;
  fn delete_default_sale(&self, id: i64) -> Result<bool>;

  // ── Sales ───────────────────────────────────────────────────────────────
  fn insert_sale(&self, sale: &NewSale) -> Result<Sale>;
  fn get_sale(&self, id: i64) -> Result<Option<Sale>>;
  fn find_sale(
    &self,
    restaurant_id: i64,
    meal_period_cat_id: i64,
    date: NaiveDate,
  ) -> Result<Option<Sale>>;
  fn list_sales_on(&self, restaurant_id: i64, date: NaiveDate) -> Result<Vec<Sale>>;
  fn update_sale(&self, sale: &Sale) -> Result<Option<Sale>>;
  fn delete_sale(&self, id: i64) -> Result<bool>;

  // ── Invoices ────────────────────────────────────────────────────────────
  fn insert_invoice(&self, invoice: &NewInvoice) -> Result<Invoice>;
  fn get_invoice(&self, id: i64) -> Result<Option<Invoice>>;
  fn find_invoice(
    &self,
    restaurant_id: i64,
    vendor: &str,
    invoice: &str,
  ) -> Result<Option<Invoice>>;
  fn list_invoices(&self, restaurant_id: i64) -> Result<Vec<Invoice>>;
  /// Invoices dated within `start..=end`.
  fn list_invoices_between(
    &self,
    restaurant_id: i64,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<Invoice>>;
  fn update_invoice(&self, invoice: &Invoice) -> Result<Option<Invoice>>;
  fn delete_invoice(&self, id: i64) -> Result<bool>;

  // ── Expenses ────────────────────────────────────────────────────────────
  fn insert_expense(&self, expense: &NewExpense) -> Result<Expense>;
  fn get_expense(&self, id: i64) -> Result<Option<Expense>>;
  fn list_expenses(&self, restaurant_id: i64) -> Result<Vec<Expense>>;
  fn list_invoice_expenses(&self, invoice_id: i64) -> Result<Vec<Expense>>;
  fn update_expense(&self, expense: &Expense) -> Result<Option<Expense>>;
  fn delete_expense(&self, id: i64) -> Result<bool>;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Abstraction over a Tally storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Store: Send + Sync {
  /// Run `f` against a consistent snapshot. Nothing `f` does is persisted.
  fn read<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn Repository) -> Result<T> + Send + 'static;

  /// Run `f` inside one transaction: committed if `f` returns `Ok`, rolled
  /// back otherwise.
  fn write<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn Repository) -> Result<T> + Send + 'static;
}
