//! JSON REST API for Tally.
//!
//! Exposes an axum [`Router`] backed by any [`tally_core::store::Store`].
//! Every handler authenticates the caller with [`auth::Identity`], runs one
//! typed operation inside a single store unit of work, and wraps the result
//! in a one-key JSON envelope such as `{"category": {...}}`.
//!
//! TLS, tracing and timeouts are the caller's responsibility.

pub mod auth;
pub mod error;
pub mod extract;

mod cat_groups;
mod categories;
mod default_sales;
mod expenses;
mod invoices;
mod meal_periods;
mod restaurants;
mod sales;
mod users;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use tally_core::store::Store;

pub use auth::TokenSigner;
pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub signer: Arc<TokenSigner>,
}

impl<S> AppState<S> {
  pub fn new(store: S, signer: TokenSigner) -> Self {
    Self {
      store:  Arc::new(store),
      signer: Arc::new(signer),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      signer: Arc::clone(&self.signer),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + 'static,
{
  Router::new()
    // Accounts
    .route("/auth/token", post(users::token::<S>))
    .route("/users", post(users::create::<S>))
    .route(
      "/users/{id}",
      get(users::get_one::<S>)
        .put(users::update::<S>)
        .delete(users::delete::<S>),
    )
    // Restaurants & membership
    .route("/restaurants", post(restaurants::create::<S>))
    .route(
      "/restaurants/{id}",
      get(restaurants::get_one::<S>)
        .put(restaurants::update::<S>)
        .delete(restaurants::delete::<S>),
    )
    .route(
      "/restaurants/{id}/users/{user_id}",
      post(restaurants::add_member::<S>)
        .put(restaurants::update_member::<S>)
        .delete(restaurants::remove_member::<S>),
    )
    // Category groups
    .route("/catgroups", post(cat_groups::create::<S>))
    .route(
      "/catgroups/{id}",
      get(cat_groups::get_one::<S>)
        .put(cat_groups::update::<S>)
        .delete(cat_groups::delete::<S>),
    )
    .route("/catgroups/restaurants/{id}", get(cat_groups::list::<S>))
    // Categories
    .route("/categories", post(categories::create::<S>))
    .route(
      "/categories/{id}",
      get(categories::get_one::<S>)
        .put(categories::update::<S>)
        .delete(categories::delete::<S>),
    )
    .route("/categories/restaurants/{id}", get(categories::list::<S>))
    .route("/categories/catgroups/{id}", get(categories::list_for_group::<S>))
    .route(
      "/categories/{id}/group/{group_id}",
      patch(categories::change_group::<S>),
    )
    // Meal periods & allocations
    .route("/mealperiods", post(meal_periods::create::<S>))
    .route(
      "/mealperiods/{id}",
      get(meal_periods::get_one::<S>)
        .put(meal_periods::update::<S>)
        .delete(meal_periods::delete::<S>),
    )
    .route("/mealperiods/restaurants/{id}", get(meal_periods::list::<S>))
    .route(
      "/mealperiods/{id}/categories/{category_id}",
      post(meal_periods::add_category::<S>)
        .get(meal_periods::get_category::<S>)
        .put(meal_periods::update_category::<S>)
        .delete(meal_periods::remove_category::<S>),
    )
    // Sales
    .route("/sales", post(sales::create::<S>))
    .route(
      "/sales/{id}",
      get(sales::get_one::<S>)
        .put(sales::update::<S>)
        .delete(sales::delete::<S>),
    )
    .route("/sales/restaurants/{id}/date/{date}", get(sales::list_on::<S>))
    .route("/defaultsales", post(default_sales::create::<S>))
    .route(
      "/defaultsales/{id}",
      get(default_sales::get_one::<S>)
        .put(default_sales::update::<S>)
        .delete(default_sales::delete::<S>),
    )
    .route("/defaultsales/restaurants/{id}", get(default_sales::list::<S>))
    // Purchasing
    .route("/invoices", post(invoices::create::<S>))
    .route(
      "/invoices/{id}",
      get(invoices::get_one::<S>)
        .put(invoices::update::<S>)
        .delete(invoices::delete::<S>),
    )
    .route("/invoices/restaurants/{id}", get(invoices::list::<S>))
    .route(
      "/invoices/restaurants/{id}/startdate/{start}/enddate/{end}",
      get(invoices::list_between::<S>),
    )
    .route("/expenses", post(expenses::create::<S>))
    .route(
      "/expenses/{id}",
      get(expenses::get_one::<S>)
        .put(expenses::update::<S>)
        .delete(expenses::delete::<S>),
    )
    .route("/expenses/restaurants/{id}", get(expenses::list::<S>))
    .route("/expenses/invoices/{id}", get(expenses::list_for_invoice::<S>))
    .route(
      "/expenses/restaurants/{id}/startdate/{start}/enddate/{end}",
      get(expenses::list_between::<S>),
    )
    .with_state(state)
}
