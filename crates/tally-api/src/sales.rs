//! Handlers for `/sales` endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde_json::json;
use tally_core::{
  model::{NewSale, SaleUpdate},
  ops::sales,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

/// `POST /sales`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewSale>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state
    .store
    .write(move |repo| sales::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "sale": sale }))))
}

/// `GET /sales/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state.store.read(move |repo| sales::get(repo, actor, id)).await?;
  Ok(Json(json!({ "sale": sale })))
}

/// `GET /sales/restaurants/{id}/date/{date}`
pub async fn list_on<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((restaurant_id, date)): Params<(i64, NaiveDate)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let list = state
    .store
    .read(move |repo| sales::list_on(repo, actor, restaurant_id, date))
    .await?;
  Ok(Json(json!({ "sales": list })))
}

/// `PUT /sales/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<SaleUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state
    .store
    .write(move |repo| sales::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "sale": sale })))
}

/// `DELETE /sales/{id}`
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
    .write(move |repo| sales::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
