//! Handlers for `/expenses` endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde_json::json;
use tally_core::{
  model::{ExpenseUpdate, NewExpense},
  ops::expenses,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /expenses`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewExpense>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let expense = state
    .store
    .write(move |repo| expenses::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "expense": expense }))))
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /expenses/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let expense = state
    .store
    .read(move |repo| expenses::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "expense": expense })))
}

/// `GET /expenses/restaurants/{id}`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(restaurant_id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let list = state
    .store
    .read(move |repo| expenses::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "expenses": list })))
}

/// `GET /expenses/invoices/{id}`
pub async fn list_for_invoice<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(invoice_id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let list = state
    .store
    .read(move |repo| expenses::list_for_invoice(repo, actor, invoice_id))
    .await?;
  Ok(Json(json!({ "expenses": list })))
}

/// `GET /expenses/restaurants/{id}/startdate/{start}/enddate/{end}`
pub async fn list_between<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((restaurant_id, start, end)): Params<(i64, NaiveDate, NaiveDate)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let list = state
    .store
    .read(move |repo| {
      expenses::list_between(repo, actor, restaurant_id, start, end)
    })
    .await?;
  Ok(Json(json!({ "expenses": list })))
}

// ─── Update / delete ─────────────────────────────────────────────────────────

/// `PUT /expenses/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<ExpenseUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let expense = state
    .store
    .write(move |repo| expenses::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "expense": expense })))
}

/// `DELETE /expenses/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  state
    .store
    .write(move |repo| expenses::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
