//! Handlers for `/invoices` endpoints.
//!
//! Date ranges are inclusive at both ends and given as `YYYY-MM-DD` path
//! segments.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde_json::json;
use tally_core::{
  model::{InvoiceUpdate, NewInvoice},
  ops::invoices,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

/// `POST /invoices`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewInvoice>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let invoice = state
    .store
    .write(move |repo| invoices::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// `GET /invoices/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let invoice = state
    .store
    .read(move |repo| invoices::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "invoice": invoice })))
}

/// `GET /invoices/restaurants/{id}`
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
    .read(move |repo| invoices::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "invoices": list })))
}

/// `GET /invoices/restaurants/{id}/startdate/{start}/enddate/{end}`
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
      invoices::list_between(repo, actor, restaurant_id, start, end)
    })
    .await?;
  Ok(Json(json!({ "invoices": list })))
}

/// `PUT /invoices/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<InvoiceUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let invoice = state
    .store
    .write(move |repo| invoices::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "invoice": invoice })))
}

/// `DELETE /invoices/{id}`
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
    .write(move |repo| invoices::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
