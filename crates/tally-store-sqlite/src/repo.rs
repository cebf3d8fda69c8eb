//! [`SqliteRepo`]: the [`Repository`] implementation over one open SQLite
//! transaction.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension as _, Params, Row, ffi};
use tally_core::{
  Error, Result,
  model::{
    Category, CategoryGroup, DayOfWeek, DefaultSale, Expense, Invoice,
    MealPeriod, MealPeriodCategory, NewCategory, NewCategoryGroup,
    NewDefaultSale, NewExpense, NewInvoice, NewMealPeriod,
    NewMealPeriodCategory, NewRestaurant, NewSale, NewUser, Restaurant,
    RestaurantUser, Sale, User, UserCredentials,
  },
  store::Repository,
};

use crate::encode::{
  self, ALLOCATION_COLUMNS, CAT_GROUP_COLUMNS, CATEGORY_COLUMNS,
  CREDENTIAL_COLUMNS, DAY_COLUMNS, DEFAULT_SALE_COLUMNS, EXPENSE_COLUMNS,
  INVOICE_COLUMNS, MEAL_PERIOD_COLUMNS, MEMBERSHIP_COLUMNS, RESTAURANT_COLUMNS,
  SALE_COLUMNS, USER_COLUMNS, encode_date, encode_decimal,
};

type Mapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

/// Map a rusqlite failure into the core error taxonomy. A unique-constraint
/// violation that slipped past the duplicate checks is still a bad request.
fn db_error(e: rusqlite::Error) -> Error {
  match &e {
    rusqlite::Error::SqliteFailure(failure, message)
      if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
    {
      Error::Duplicate(
        message
          .clone()
          .unwrap_or_else(|| "a row with the same key already exists".to_owned()),
      )
    }
    _ => Error::store(e),
  }
}

/// A [`Repository`] bound to a connection that is already inside a
/// transaction.
pub struct SqliteRepo<'c> {
  conn: &'c Connection,
}

impl<'c> SqliteRepo<'c> {
  pub fn new(conn: &'c Connection) -> Self { Self { conn } }

  fn one<T>(&self, sql: &str, params: impl Params, map: Mapper<T>) -> Result<T> {
    self
      .conn
      .prepare_cached(sql)
      .and_then(|mut stmt| stmt.query_row(params, map))
      .map_err(db_error)
  }

  fn maybe<T>(
    &self,
    sql: &str,
    params: impl Params,
    map: Mapper<T>,
  ) -> Result<Option<T>> {
    self
      .conn
      .prepare_cached(sql)
      .and_then(|mut stmt| stmt.query_row(params, map).optional())
      .map_err(db_error)
  }

  fn many<T>(&self, sql: &str, params: impl Params, map: Mapper<T>) -> Result<Vec<T>> {
    self
      .conn
      .prepare_cached(sql)
      .and_then(|mut stmt| {
        let rows = stmt.query_map(params, map)?;
        rows.collect()
      })
      .map_err(db_error)
  }

  /// Run a DELETE and report whether it removed anything.
  fn remove(&self, sql: &str, params: impl Params) -> Result<bool> {
    self
      .conn
      .prepare_cached(sql)
      .and_then(|mut stmt| stmt.execute(params))
      .map(|n| n > 0)
      .map_err(db_error)
  }
}

impl Repository for SqliteRepo<'_> {
  // ── Users ───────────────────────────────────────────────────────────────

  fn insert_user(&self, user: &NewUser) -> Result<User> {
    self.one(
      &format!(
        "INSERT INTO users (email_address, first_name, last_name, password_hash)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING {USER_COLUMNS}"
      ),
      rusqlite::params![
        user.email_address,
        user.first_name,
        user.last_name,
        user.password_hash,
      ],
      encode::user,
    )
  }

  fn get_user(&self, id: i64) -> Result<Option<User>> {
    self.maybe(
      &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
      [id],
      encode::user,
    )
  }

  fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
    self.maybe(
      &format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE email_address = ?1"),
      [email],
      encode::credentials,
    )
  }

  fn update_user(
    &self,
    user: &User,
    password_hash: Option<&str>,
  ) -> Result<Option<User>> {
    self.maybe(
      &format!(
        "UPDATE users
         SET email_address = ?2, first_name = ?3, last_name = ?4,
             password_hash = COALESCE(?5, password_hash)
         WHERE id = ?1
         RETURNING {USER_COLUMNS}"
      ),
      rusqlite::params![
        user.id,
        user.email_address,
        user.first_name,
        user.last_name,
        password_hash,
      ],
      encode::user,
    )
  }

  fn delete_user(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM users WHERE id = ?1", [id])
  }

  // ── Restaurants ─────────────────────────────────────────────────────────

  fn insert_restaurant(
    &self,
    owner_id: i64,
    fields: &NewRestaurant,
  ) -> Result<Restaurant> {
    self.one(
      &format!(
        "INSERT INTO restaurants
           (owner_id, name, address, phone, email, website, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING {RESTAURANT_COLUMNS}"
      ),
      rusqlite::params![
        owner_id,
        fields.name,
        fields.address,
        fields.phone,
        fields.email,
        fields.website,
        fields.notes,
      ],
      encode::restaurant,
    )
  }

  fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>> {
    self.maybe(
      &format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?1"),
      [id],
      encode::restaurant,
    )
  }

  fn update_restaurant(&self, r: &Restaurant) -> Result<Option<Restaurant>> {
    self.maybe(
      &format!(
        "UPDATE restaurants
         SET name = ?2, address = ?3, phone = ?4, email = ?5, website = ?6,
             notes = ?7
         WHERE id = ?1
         RETURNING {RESTAURANT_COLUMNS}"
      ),
      rusqlite::params![
        r.id, r.name, r.address, r.phone, r.email, r.website, r.notes,
      ],
      encode::restaurant,
    )
  }

  fn delete_restaurant(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM restaurants WHERE id = ?1", [id])
  }

  // ── Memberships ─────────────────────────────────────────────────────────

  fn insert_membership(&self, m: &RestaurantUser) -> Result<RestaurantUser> {
    self.one(
      &format!(
        "INSERT INTO restaurants_users (restaurant_id, user_id, is_admin)
         VALUES (?1, ?2, ?3)
         RETURNING {MEMBERSHIP_COLUMNS}"
      ),
      rusqlite::params![m.restaurant_id, m.user_id, m.is_admin],
      encode::membership,
    )
  }

  fn get_membership(
    &self,
    restaurant_id: i64,
    user_id: i64,
  ) -> Result<Option<RestaurantUser>> {
    self.maybe(
      &format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM restaurants_users
         WHERE restaurant_id = ?1 AND user_id = ?2"
      ),
      [restaurant_id, user_id],
      encode::membership,
    )
  }

  fn list_memberships(&self, restaurant_id: i64) -> Result<Vec<RestaurantUser>> {
    self.many(
      &format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM restaurants_users
         WHERE restaurant_id = ?1 ORDER BY user_id"
      ),
      [restaurant_id],
      encode::membership,
    )
  }

  fn list_user_memberships(&self, user_id: i64) -> Result<Vec<RestaurantUser>> {
    self.many(
      &format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM restaurants_users
         WHERE user_id = ?1 ORDER BY restaurant_id"
      ),
      [user_id],
      encode::membership,
    )
  }

  fn update_membership(
    &self,
    m: &RestaurantUser,
  ) -> Result<Option<RestaurantUser>> {
    self.maybe(
      &format!(
        "UPDATE restaurants_users SET is_admin = ?3
         WHERE restaurant_id = ?1 AND user_id = ?2
         RETURNING {MEMBERSHIP_COLUMNS}"
      ),
      rusqlite::params![m.restaurant_id, m.user_id, m.is_admin],
      encode::membership,
    )
  }

  fn delete_membership(&self, restaurant_id: i64, user_id: i64) -> Result<bool> {
    self.remove(
      "DELETE FROM restaurants_users WHERE restaurant_id = ?1 AND user_id = ?2",
      [restaurant_id, user_id],
    )
  }

  // ── Category groups ─────────────────────────────────────────────────────

  fn insert_cat_group(&self, g: &NewCategoryGroup) -> Result<CategoryGroup> {
    self.one(
      &format!(
        "INSERT INTO cat_groups (restaurant_id, name, notes)
         VALUES (?1, ?2, ?3)
         RETURNING {CAT_GROUP_COLUMNS}"
      ),
      rusqlite::params![g.restaurant_id, g.name, g.notes],
      encode::cat_group,
    )
  }

  fn get_cat_group(&self, id: i64) -> Result<Option<CategoryGroup>> {
    self.maybe(
      &format!("SELECT {CAT_GROUP_COLUMNS} FROM cat_groups WHERE id = ?1"),
      [id],
      encode::cat_group,
    )
  }

  fn find_cat_group(
    &self,
    restaurant_id: i64,
    name: &str,
  ) -> Result<Option<CategoryGroup>> {
    self.maybe(
      &format!(
        "SELECT {CAT_GROUP_COLUMNS} FROM cat_groups
         WHERE restaurant_id = ?1 AND name = ?2"
      ),
      rusqlite::params![restaurant_id, name],
      encode::cat_group,
    )
  }

  fn list_cat_groups(&self, restaurant_id: i64) -> Result<Vec<CategoryGroup>> {
    self.many(
      &format!(
        "SELECT {CAT_GROUP_COLUMNS} FROM cat_groups
         WHERE restaurant_id = ?1 ORDER BY id"
      ),
      [restaurant_id],
      encode::cat_group,
    )
  }

  fn update_cat_group(&self, g: &CategoryGroup) -> Result<Option<CategoryGroup>> {
    self.maybe(
      &format!(
        "UPDATE cat_groups SET name = ?2, notes = ?3 WHERE id = ?1
         RETURNING {CAT_GROUP_COLUMNS}"
      ),
      rusqlite::params![g.id, g.name, g.notes],
      encode::cat_group,
    )
  }

  fn delete_cat_group(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM cat_groups WHERE id = ?1", [id])
  }

  // ── Categories ──────────────────────────────────────────────────────────

  fn insert_category(&self, c: &NewCategory) -> Result<Category> {
    self.one(
      &format!(
        "INSERT INTO categories
           (restaurant_id, name, cat_group_id, cogs_percent, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {CATEGORY_COLUMNS}"
      ),
      rusqlite::params![
        c.restaurant_id,
        c.name,
        c.cat_group_id,
        encode_decimal(c.cogs_percent),
        c.notes,
      ],
      encode::category,
    )
  }

  fn get_category(&self, id: i64) -> Result<Option<Category>> {
    self.maybe(
      &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
      [id],
      encode::category,
    )
  }

  fn find_category(&self, restaurant_id: i64, name: &str) -> Result<Option<Category>> {
    self.maybe(
      &format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories
         WHERE restaurant_id = ?1 AND name = ?2"
      ),
      rusqlite::params![restaurant_id, name],
      encode::category,
    )
  }

  fn list_categories(&self, restaurant_id: i64) -> Result<Vec<Category>> {
    self.many(
      &format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories
         WHERE restaurant_id = ?1 ORDER BY id"
      ),
      [restaurant_id],
      encode::category,
    )
  }

  fn list_group_categories(&self, cat_group_id: i64) -> Result<Vec<Category>> {
    self.many(
      &format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories
         WHERE cat_group_id = ?1 ORDER BY id"
      ),
      [cat_group_id],
      encode::category,
    )
  }

  fn update_category(&self, c: &Category) -> Result<Option<Category>> {
    self.maybe(
      &format!(
        "UPDATE categories
         SET name = ?2, cat_group_id = ?3, cogs_percent = ?4, notes = ?5
         WHERE id = ?1
         RETURNING {CATEGORY_COLUMNS}"
      ),
      rusqlite::params![
        c.id,
        c.name,
        c.cat_group_id,
        encode_decimal(c.cogs_percent),
        c.notes,
      ],
      encode::category,
    )
  }

  fn delete_category(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM categories WHERE id = ?1", [id])
  }

  // ── Meal periods ────────────────────────────────────────────────────────

  fn insert_meal_period(&self, p: &NewMealPeriod) -> Result<MealPeriod> {
    self.one(
      &format!(
        "INSERT INTO meal_periods (restaurant_id, name, notes)
         VALUES (?1, ?2, ?3)
         RETURNING {MEAL_PERIOD_COLUMNS}"
      ),
      rusqlite::params![p.restaurant_id, p.name, p.notes],
      encode::meal_period,
    )
  }

  fn get_meal_period(&self, id: i64) -> Result<Option<MealPeriod>> {
    self.maybe(
      &format!("SELECT {MEAL_PERIOD_COLUMNS} FROM meal_periods WHERE id = ?1"),
      [id],
      encode::meal_period,
    )
  }

  fn find_meal_period(
    &self,
    restaurant_id: i64,
    name: &str,
  ) -> Result<Option<MealPeriod>> {
    self.maybe(
      &format!(
        "SELECT {MEAL_PERIOD_COLUMNS} FROM meal_periods
         WHERE restaurant_id = ?1 AND name = ?2"
      ),
      rusqlite::params![restaurant_id, name],
      encode::meal_period,
    )
  }

  fn list_meal_periods(&self, restaurant_id: i64) -> Result<Vec<MealPeriod>> {
    self.many(
      &format!(
        "SELECT {MEAL_PERIOD_COLUMNS} FROM meal_periods
         WHERE restaurant_id = ?1 ORDER BY id"
      ),
      [restaurant_id],
      encode::meal_period,
    )
  }

  fn update_meal_period(&self, p: &MealPeriod) -> Result<Option<MealPeriod>> {
    self.maybe(
      &format!(
        "UPDATE meal_periods SET name = ?2, notes = ?3 WHERE id = ?1
         RETURNING {MEAL_PERIOD_COLUMNS}"
      ),
      rusqlite::params![p.id, p.name, p.notes],
      encode::meal_period,
    )
  }

  fn delete_meal_period(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM meal_periods WHERE id = ?1", [id])
  }

  // ── Meal period / category allocations ──────────────────────────────────

  fn insert_allocation(
    &self,
    a: &NewMealPeriodCategory,
  ) -> Result<MealPeriodCategory> {
    self.one(
      &format!(
        "INSERT INTO meal_periods_categories
           (restaurant_id, meal_period_id, category_id,
            sales_percent_of_period, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {ALLOCATION_COLUMNS}"
      ),
      rusqlite::params![
        a.restaurant_id,
        a.meal_period_id,
        a.category_id,
        encode_decimal(a.sales_percent_of_period),
        a.notes,
      ],
      encode::allocation,
    )
  }

  fn get_allocation(&self, id: i64) -> Result<Option<MealPeriodCategory>> {
    self.maybe(
      &format!(
        "SELECT {ALLOCATION_COLUMNS} FROM meal_periods_categories WHERE id = ?1"
      ),
      [id],
      encode::allocation,
    )
  }

  fn find_allocation(
    &self,
    meal_period_id: i64,
    category_id: i64,
  ) -> Result<Option<MealPeriodCategory>> {
    self.maybe(
      &format!(
        "SELECT {ALLOCATION_COLUMNS} FROM meal_periods_categories
         WHERE meal_period_id = ?1 AND category_id = ?2"
      ),
      [meal_period_id, category_id],
      encode::allocation,
    )
  }

  fn list_allocations(&self, restaurant_id: i64) -> Result<Vec<MealPeriodCategory>> {
    self.many(
      &format!(
        "SELECT {ALLOCATION_COLUMNS} FROM meal_periods_categories
         WHERE restaurant_id = ?1 ORDER BY id"
      ),
      [restaurant_id],
      encode::allocation,
    )
  }

  fn update_allocation(
    &self,
    a: &MealPeriodCategory,
  ) -> Result<Option<MealPeriodCategory>> {
    self.maybe(
      &format!(
        "UPDATE meal_periods_categories
         SET sales_percent_of_period = ?2, notes = ?3
         WHERE id = ?1
         RETURNING {ALLOCATION_COLUMNS}"
      ),
      rusqlite::params![a.id, encode_decimal(a.sales_percent_of_period), a.notes],
      encode::allocation,
    )
  }

  fn delete_allocation(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM meal_periods_categories WHERE id = ?1", [id])
  }

  // ── Days of the week ────────────────────────────────────────────────────

  fn get_day(&self, id: i64) -> Result<Option<DayOfWeek>> {
    self.maybe(
      &format!("SELECT {DAY_COLUMNS} FROM days_of_week WHERE id = ?1"),
      [id],
      encode::day,
    )
  }

  // ── Default sales ───────────────────────────────────────────────────────

  fn insert_default_sale(&self, s: &NewDefaultSale) -> Result<DefaultSale> {
    self.one(
      &format!(
        "INSERT INTO default_sales
           (restaurant_id, meal_period_id, day_id, total, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {DEFAULT_SALE_COLUMNS}"
      ),
      rusqlite::params![
        s.restaurant_id,
        s.meal_period_id,
        s.day_id,
        encode_decimal(s.total),
        s.notes,
      ],
      encode::default_sale,
    )
  }

  fn get_default_sale(&self, id: i64) -> Result<Option<DefaultSale>> {
    self.maybe(
      &format!("SELECT {DEFAULT_SALE_COLUMNS} FROM default_sales WHERE id = ?1"),
      [id],
      encode::default_sale,
    )
  }

  fn find_default_sale(
    &self,
    restaurant_id: i64,
    meal_period_id: i64,
    day_id: i64,
  ) -> Result<Option<DefaultSale>> {
    self.maybe(
      &format!(
        "SELECT {DEFAULT_SALE_COLUMNS} FROM default_sales
         WHERE restaurant_id = ?1 AND meal_period_id = ?2 AND day_id = ?3"
      ),
      [restaurant_id, meal_period_id, day_id],
      encode::default_sale,
    )
  }

  fn list_default_sales(&self, restaurant_id: i64) -> Result<Vec<DefaultSale>> {
    self.many(
      &format!(
        "SELECT {DEFAULT_SALE_COLUMNS} FROM default_sales
         WHERE restaurant_id = ?1 ORDER BY day_id, meal_period_id"
      ),
      [restaurant_id],
      encode::default_sale,
    )
  }

  fn update_default_sale(&self, s: &DefaultSale) -> Result<Option<DefaultSale>> {
    self.maybe(
      &format!(
        "UPDATE default_sales SET total = ?2, notes = ?3 WHERE id = ?1
         RETURNING {DEFAULT_SALE_COLUMNS}"
      ),
      rusqlite::params![s.id, encode_decimal(s.total), s.notes],
      encode::default_sale,
    )
  }

  fn delete_default_sale(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM default_sales WHERE id = ?1", [id])
  }

  // ── Sales ───────────────────────────────────────────────────────────────

  fn insert_sale(&self, s: &NewSale) -> Result<Sale> {
    self.one(
      &format!(
        "INSERT INTO sales
           (restaurant_id, meal_period_category_id, date, expected_sales,
            actual_sales, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING {SALE_COLUMNS}"
      ),
      rusqlite::params![
        s.restaurant_id,
        s.meal_period_cat_id,
        encode_date(s.date),
        encode_decimal(s.expected_sales),
        s.actual_sales.map(encode_decimal),
        s.notes,
      ],
      encode::sale,
    )
  }

  fn get_sale(&self, id: i64) -> Result<Option<Sale>> {
    self.maybe(
      &format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"),
      [id],
      encode::sale,
    )
  }

  fn find_sale(
    &self,
    restaurant_id: i64,
    meal_period_cat_id: i64,
    date: NaiveDate,
  ) -> Result<Option<Sale>> {
    self.maybe(
      &format!(
        "SELECT {SALE_COLUMNS} FROM sales
         WHERE restaurant_id = ?1 AND meal_period_category_id = ?2 AND date = ?3"
      ),
      rusqlite::params![restaurant_id, meal_period_cat_id, encode_date(date)],
      encode::sale,
    )
  }

  fn list_sales_on(&self, restaurant_id: i64, date: NaiveDate) -> Result<Vec<Sale>> {
    self.many(
      &format!(
        "SELECT {SALE_COLUMNS} FROM sales
         WHERE restaurant_id = ?1 AND date = ?2 ORDER BY id"
      ),
      rusqlite::params![restaurant_id, encode_date(date)],
      encode::sale,
    )
  }

  fn update_sale(&self, s: &Sale) -> Result<Option<Sale>> {
    self.maybe(
      &format!(
        "UPDATE sales
         SET expected_sales = ?2, actual_sales = ?3, notes = ?4
         WHERE id = ?1
         RETURNING {SALE_COLUMNS}"
      ),
      rusqlite::params![
        s.id,
        encode_decimal(s.expected_sales),
        s.actual_sales.map(encode_decimal),
        s.notes,
      ],
      encode::sale,
    )
  }

  fn delete_sale(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM sales WHERE id = ?1", [id])
  }

  // ── Invoices ────────────────────────────────────────────────────────────

  fn insert_invoice(&self, i: &NewInvoice) -> Result<Invoice> {
    self.one(
      &format!(
        "INSERT INTO invoices (restaurant_id, date, invoice, vendor, total, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING {INVOICE_COLUMNS}"
      ),
      rusqlite::params![
        i.restaurant_id,
        encode_date(i.date),
        i.invoice,
        i.vendor,
        encode_decimal(i.total),
        i.notes,
      ],
      encode::invoice,
    )
  }

  fn get_invoice(&self, id: i64) -> Result<Option<Invoice>> {
    self.maybe(
      &format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"),
      [id],
      encode::invoice,
    )
  }

  fn find_invoice(
    &self,
    restaurant_id: i64,
    vendor: &str,
    invoice: &str,
  ) -> Result<Option<Invoice>> {
    self.maybe(
      &format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices
         WHERE restaurant_id = ?1 AND vendor = ?2 AND invoice = ?3"
      ),
      rusqlite::params![restaurant_id, vendor, invoice],
      encode::invoice,
    )
  }

  fn list_invoices(&self, restaurant_id: i64) -> Result<Vec<Invoice>> {
    self.many(
      &format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices
         WHERE restaurant_id = ?1 ORDER BY date, id"
      ),
      [restaurant_id],
      encode::invoice,
    )
  }

  fn list_invoices_between(
    &self,
    restaurant_id: i64,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<Invoice>> {
    // ISO dates compare correctly as text.
    self.many(
      &format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices
         WHERE restaurant_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date, id"
      ),
      rusqlite::params![restaurant_id, encode_date(start), encode_date(end)],
      encode::invoice,
    )
  }

  fn update_invoice(&self, i: &Invoice) -> Result<Option<Invoice>> {
    self.maybe(
      &format!(
        "UPDATE invoices
         SET date = ?2, invoice = ?3, vendor = ?4, total = ?5, notes = ?6
         WHERE id = ?1
         RETURNING {INVOICE_COLUMNS}"
      ),
      rusqlite::params![
        i.id,
        encode_date(i.date),
        i.invoice,
        i.vendor,
        encode_decimal(i.total),
        i.notes,
      ],
      encode::invoice,
    )
  }

  fn delete_invoice(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM invoices WHERE id = ?1", [id])
  }

  // ── Expenses ────────────────────────────────────────────────────────────

  fn insert_expense(&self, e: &NewExpense) -> Result<Expense> {
    self.one(
      &format!(
        "INSERT INTO expenses (restaurant_id, category_id, invoice_id, amount, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {EXPENSE_COLUMNS}"
      ),
      rusqlite::params![
        e.restaurant_id,
        e.category_id,
        e.invoice_id,
        encode_decimal(e.amount),
        e.notes,
      ],
      encode::expense,
    )
  }

  fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
    self.maybe(
      &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"),
      [id],
      encode::expense,
    )
  }

  fn list_expenses(&self, restaurant_id: i64) -> Result<Vec<Expense>> {
    self.many(
      &format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses
         WHERE restaurant_id = ?1 ORDER BY id"
      ),
      [restaurant_id],
      encode::expense,
    )
  }

  fn list_invoice_expenses(&self, invoice_id: i64) -> Result<Vec<Expense>> {
    self.many(
      &format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE invoice_id = ?1 ORDER BY id"
      ),
      [invoice_id],
      encode::expense,
    )
  }

  fn update_expense(&self, e: &Expense) -> Result<Option<Expense>> {
    self.maybe(
      &format!(
        "UPDATE expenses
         SET category_id = ?2, invoice_id = ?3, amount = ?4, notes = ?5
         WHERE id = ?1
         RETURNING {EXPENSE_COLUMNS}"
      ),
      rusqlite::params![
        e.id,
        e.category_id,
        e.invoice_id,
        encode_decimal(e.amount),
        e.notes,
      ],
      encode::expense,
    )
  }

  fn delete_expense(&self, id: i64) -> Result<bool> {
    self.remove("DELETE FROM expenses WHERE id = ?1", [id])
  }
}
