//! Handlers for `/restaurants` endpoints, including membership.
//!
//! Creating a restaurant seeds it with the standard taxonomy in the same
//! transaction.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tally_core::{
  model::{NewRestaurant, RestaurantUpdate},
  ops::restaurants,
  store::Store,
};

use crate::{
  AppState,
  auth::Identity,
  error::ApiError,
  extract::{Body, Params},
};

// ─── Restaurant ──────────────────────────────────────────────────────────────

/// `POST /restaurants`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Body(body): Body<NewRestaurant>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let (restaurant, seeded) = state
    .store
    .write(move |repo| restaurants::register_with_defaults(repo, actor, &body))
    .await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "restaurant": restaurant, "seeded": seeded })),
  ))
}

/// `GET /restaurants/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let restaurant = state
    .store
    .read(move |repo| restaurants::get(repo, actor, id))
    .await?;
  Ok(Json(json!({ "restaurant": restaurant })))
}

/// `PUT /restaurants/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<RestaurantUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let restaurant = state
    .store
    .write(move |repo| restaurants::update(repo, actor, id, body))
    .await?;
  Ok(Json(json!({ "restaurant": restaurant })))
}

/// `DELETE /restaurants/{id}`
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
    .write(move |repo| restaurants::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}

// ─── Membership ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
  #[serde(default)]
  pub is_admin: bool,
}

/// `POST /restaurants/{id}/users/{user_id}`
pub async fn add_member<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, user_id)): Params<(i64, i64)>,
  body: Option<Body<MemberBody>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let MemberBody { is_admin } = body.map(|Body(b)| b).unwrap_or_default();
  let added = state
    .store
    .write(move |repo| {
      restaurants::add_member(repo, actor, id, user_id, is_admin)
    })
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "added": added }))))
}

/// `PUT /restaurants/{id}/users/{user_id}`
pub async fn update_member<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, user_id)): Params<(i64, i64)>,
  body: Option<Body<MemberBody>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let MemberBody { is_admin } = body.map(|Body(b)| b).unwrap_or_default();
  let membership = state
    .store
    .write(move |repo| {
      restaurants::update_member(repo, actor, id, user_id, is_admin)
    })
    .await?;
  Ok(Json(json!({ "restUser": membership })))
}

/// `DELETE /restaurants/{id}/users/{user_id}`
pub async fn remove_member<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params((id, user_id)): Params<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  state
    .store
    .write(move |repo| restaurants::remove_member(repo, actor, id, user_id))
    .await?;
  Ok(Json(json!({
    "deleted": { "restaurantId": id, "userId": user_id }
  })))
}
