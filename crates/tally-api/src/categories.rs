//! Handlers for `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/categories` | Admins only; the group must share the restaurant |
//! | `GET`  | `/categories/{id}` | Includes restaurant and group names |
//! | `GET`  | `/categories/restaurants/{id}` | |
//! | `GET`  | `/categories/catgroups/{id}` | |
//! | `PATCH` | `/categories/{id}/group/{group_id}` | A `group_id` of 0 ungroups |
//! | `PUT`  | `/categories/{id}` | `"catGroupId": null` ungroups |
//! | `DELETE` | `/categories/{id}` | |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tally_core::{
  model::{CategoryUpdate, NewCategory},
  ops::categories,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /categories`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewCategory>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let category = state
    .store
    .write(move |repo| categories::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "category": category }))))
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /categories/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let category = state
    .store
    .read(move |repo| categories::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "category": category })))
}

/// `GET /categories/restaurants/{id}`
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
    .read(move |repo| categories::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "categories": list })))
}

/// `GET /categories/catgroups/{id}`
pub async fn list_for_group<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(group_id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let list = state
    .store
    .read(move |repo| categories::list_for_group(repo, actor, group_id))
    .await?;
  Ok(Json(json!({ "categories": list })))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /categories/{id}/group/{group_id}`
pub async fn change_group<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, group_id)): Params<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let category = state
    .store
    .write(move |repo| categories::change_group(repo, actor, id, group_id))
    .await?;
  Ok(Json(json!({ "category": category })))
}

/// `PUT /categories/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<CategoryUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let category = state
    .store
    .write(move |repo| categories::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "category": category })))
}

/// `DELETE /categories/{id}`
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
    .write(move |repo| categories::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
