//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup. The version is recorded in
//! `PRAGMA user_version`; a database written by a newer build is refused.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Money and fractions are decimal strings, dates are `YYYY-MM-DD`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- AUTOINCREMENT: a deleted account's id is never handed to a new one.
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email_address TEXT NOT NULL UNIQUE,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    password_hash TEXT NOT NULL
);

-- Deleting the owner deletes the restaurant; no restaurant is ever ownerless.
CREATE TABLE IF NOT EXISTS restaurants (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name     TEXT NOT NULL,
    address  TEXT,
    phone    TEXT,
    email    TEXT,
    website  TEXT,
    notes    TEXT
);

CREATE TABLE IF NOT EXISTS restaurants_users (
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    user_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    is_admin      INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (restaurant_id, user_id)
);

CREATE TABLE IF NOT EXISTS cat_groups (
    id            INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    notes         TEXT,
    UNIQUE (restaurant_id, name)
);

CREATE TABLE IF NOT EXISTS categories (
    id            INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    cat_group_id  INTEGER REFERENCES cat_groups(id) ON DELETE SET NULL,
    cogs_percent  TEXT NOT NULL,
    notes         TEXT,
    UNIQUE (restaurant_id, name)
);

CREATE TABLE IF NOT EXISTS meal_periods (
    id            INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    notes         TEXT,
    UNIQUE (restaurant_id, name)
);

CREATE TABLE IF NOT EXISTS meal_periods_categories (
    id                      INTEGER PRIMARY KEY,
    restaurant_id           INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    meal_period_id          INTEGER NOT NULL REFERENCES meal_periods(id) ON DELETE CASCADE,
    category_id             INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    sales_percent_of_period TEXT NOT NULL,
    notes                   TEXT,
    UNIQUE (meal_period_id, category_id)
);

-- Monday = 1 through Sunday = 7.
CREATE TABLE IF NOT EXISTS days_of_week (
    id   INTEGER PRIMARY KEY CHECK (id BETWEEN 1 AND 7),
    name TEXT NOT NULL UNIQUE
);

INSERT OR IGNORE INTO days_of_week (id, name) VALUES
    (1, 'Monday'), (2, 'Tuesday'), (3, 'Wednesday'), (4, 'Thursday'),
    (5, 'Friday'), (6, 'Saturday'), (7, 'Sunday');

CREATE TABLE IF NOT EXISTS default_sales (
    id             INTEGER PRIMARY KEY,
    restaurant_id  INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    meal_period_id INTEGER NOT NULL REFERENCES meal_periods(id) ON DELETE CASCADE,
    day_id         INTEGER NOT NULL REFERENCES days_of_week(id),
    total          TEXT NOT NULL,
    notes          TEXT,
    UNIQUE (restaurant_id, meal_period_id, day_id)
);

CREATE TABLE IF NOT EXISTS sales (
    id                      INTEGER PRIMARY KEY,
    restaurant_id           INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    meal_period_category_id INTEGER NOT NULL
                            REFERENCES meal_periods_categories(id) ON DELETE CASCADE,
    date                    TEXT NOT NULL,
    expected_sales          TEXT NOT NULL,
    actual_sales            TEXT,
    notes                   TEXT,
    UNIQUE (restaurant_id, meal_period_category_id, date)
);

CREATE TABLE IF NOT EXISTS invoices (
    id            INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    date          TEXT NOT NULL,
    invoice       TEXT NOT NULL,   -- the vendor's invoice number
    vendor        TEXT NOT NULL,
    total         TEXT NOT NULL,
    notes         TEXT,
    UNIQUE (restaurant_id, vendor, invoice)
);

CREATE TABLE IF NOT EXISTS expenses (
    id            INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
    category_id   INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    invoice_id    INTEGER NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    amount        TEXT NOT NULL,
    notes         TEXT
);

CREATE INDEX IF NOT EXISTS restaurants_owner_idx   ON restaurants(owner_id);
CREATE INDEX IF NOT EXISTS memberships_user_idx    ON restaurants_users(user_id);
CREATE INDEX IF NOT EXISTS categories_group_idx    ON categories(cat_group_id);
CREATE INDEX IF NOT EXISTS allocations_rest_idx    ON meal_periods_categories(restaurant_id);
CREATE INDEX IF NOT EXISTS sales_date_idx          ON sales(restaurant_id, date);
CREATE INDEX IF NOT EXISTS invoices_date_idx       ON invoices(restaurant_id, date);
CREATE INDEX IF NOT EXISTS expenses_invoice_idx    ON expenses(invoice_id);
CREATE INDEX IF NOT EXISTS expenses_restaurant_idx ON expenses(restaurant_id);

PRAGMA user_version = 1;
";
