//! Handlers for `/mealperiods` endpoints and the meal period / category
//! allocations nested beneath them.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tally_core::{
  model::{AllocationFields, AllocationUpdate, MealPeriodUpdate, NewMealPeriod},
  ops::{allocations, meal_periods},
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

// ─── Meal periods ────────────────────────────────────────────────────────────

/// `POST /mealperiods`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewMealPeriod>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let period = state
    .store
    .write(move |repo| meal_periods::register(repo, actor, &body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "mealPeriod": period }))))
}

/// `GET /mealperiods/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let period = state
    .store
    .read(move |repo| meal_periods::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "mealPeriod": period })))
}

/// `GET /mealperiods/restaurants/{id}`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(restaurant_id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let periods = state
    .store
    .read(move |repo| meal_periods::list(repo, actor, restaurant_id))
    .await?;
  Ok(Json(json!({ "mealPeriods": periods })))
}

/// `PUT /mealperiods/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<MealPeriodUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let period = state
    .store
    .write(move |repo| meal_periods::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "mealPeriod": period })))
}

/// `DELETE /mealperiods/{id}`
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
    .write(move |repo| meal_periods::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}

// ─── Allocations ─────────────────────────────────────────────────────────────

/// `POST /mealperiods/{id}/categories/{category_id}`
pub async fn add_category<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, category_id)): Params<(i64, i64)>,
  Body(body): Body<AllocationFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let allocation = state
    .store
    .write(move |repo| allocations::register(repo, actor, id, category_id, body))
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "mealPeriodCat": allocation }))))
}

/// `GET /mealperiods/{id}/categories/{category_id}`
pub async fn get_category<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, category_id)): Params<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let allocation = state
    .store
    .read(move |repo| allocations::get(repo, actor, id, category_id))
    .await?;
  Ok(Json(json!({ "mealPeriodCat": allocation })))
}

/// `PUT /mealperiods/{id}/categories/{category_id}`
pub async fn update_category<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, category_id)): Params<(i64, i64)>,
  Body(body): Body<AllocationUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let allocation = state
    .store
    .write(move |repo| allocations::update(repo, actor, id, category_id, body))
    .await?;
  Ok(Json(json!({ "mealPeriodCat": allocation })))
}

/// `DELETE /mealperiods/{id}/categories/{category_id}`
pub async fn remove_category<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, category_id)): Params<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  state
    .store
    .write(move |repo| allocations::delete(repo, actor, id, category_id))
    .await?;
  Ok(Json(json!({
    "deleted": { "mealPeriodId": id, "categoryId": category_id }
  })))
}
