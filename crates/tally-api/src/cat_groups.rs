//! Handlers for `/catgroups` endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tally_core::{
  model::{CategoryGroupUpdate, NewCategoryGroup},
  ops::cat_groups,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

/// `POST /catgroups`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewCategoryGroup>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let group = state
    .store
    .write(move |repo| cat_groups::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "catGroup": group }))))
}

/// `GET /catgroups/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let group = state
    .store
    .read(move |repo| cat_groups::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "catGroup": group })))
}

/// `GET /catgroups/restaurants/{id}`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(restaurant_id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let groups = state
    .store
    .read(move |repo| cat_groups::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "catGroups": groups })))
}

/// `PUT /catgroups/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<CategoryGroupUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let group = state
    .store
    .write(move |repo| cat_groups::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "catGroup": group })))
}

/// `DELETE /catgroups/{id}`
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
    .write(move |repo| cat_groups::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
