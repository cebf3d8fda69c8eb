//! Handlers for `/defaultsales` endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tally_core::{
  model::{DefaultSaleUpdate, NewDefaultSale},
  ops::default_sales,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

/// `POST /defaultsales`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewDefaultSale>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state
    .store
    .write(move |repo| default_sales::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "defaultSale": sale }))))
}

/// `GET /defaultsales/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state
    .store
    .read(move |repo| default_sales::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "defaultSale": sale })))
}

/// `GET /defaultsales/restaurants/{id}`
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
    .read(move |repo| default_sales::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "defaultSales": list })))
}

/// `PUT /defaultsales/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<DefaultSaleUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let sale = state
    .store
    .write(move |repo| default_sales::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "defaultSale": sale })))
}

/// `DELETE /defaultsales/{id}`
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
    .write(move |repo| default_sales::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
