//! Handlers for `/auth/token` and `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/token` | Body: `{"emailAddress","password"}`; no token needed |
//! | `POST` | `/users` | Registers an account and returns a token for it |
//! | `GET`  | `/users/{id}` | The caller's own profile and restaurants |
//! | `PUT`  | `/users/{id}` | Any subset of fields, including `password` |
//! | `DELETE` | `/users/{id}` | Also deletes restaurants the user owns |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tally_core::{
  model::{NewUser, UserUpdate},
  ops::users,
  store::Store,
};

use crate::{
  AppState,
  auth::{Identity, hash_password_blocking, verify_password},
  error::ApiError,
  extract::{Body, Params},
};

// ─── Token ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
  pub email_address: String,
  pub password:      String,
}

/// `POST /auth/token`
pub async fn token<S>(
  State(state): State<AppState<S>>,
  Body(body): Body<TokenBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let user = state
    .store
    .read(move |repo| {
      users::authenticate(repo, &body.email_address, &body.password, verify_password)
    })
    .await?;
  let token = state.signer.issue(&user)?;
  Ok(Json(json!({ "token": token, "id": user.id })))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub email_address: String,
  pub password:      String,
  pub first_name:    String,
  pub last_name:     String,
}

/// `POST /users`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Body(body): Body<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let password_hash = hash_password_blocking(body.password).await?;
  let new = NewUser {
    email_address: body.email_address,
    first_name: body.first_name,
    last_name: body.last_name,
    password_hash,
  };
  let user = state
    .store
    .write(move |repo| users::register(repo, &new))
    .await?;
  let token = state.signer.issue(&user)?;
  Ok((StatusCode::CREATED, Json(json!({ "user": user, "token": token }))))
}

// ─── Get / update / delete ───────────────────────────────────────────────────

/// `GET /users/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let user = state.store.read(move |repo| users::get(repo, actor, id)).await?;
  Ok(Json(json!({ "user": user })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub email_address: Option<String>,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub password:      Option<String>,
}

/// `PUT /users/{id}`: answers with the updated user and a fresh token.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Identity(actor): Identity,
  Params(id): Params<i64>,
  Body(body): Body<UpdateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store + 'static,
{
  let password_hash = match body.password {
    Some(password) => Some(hash_password_blocking(password).await?),
    None => None,
  };
  let update = UserUpdate {
    email_address: body.email_address,
    first_name: body.first_name,
    last_name: body.last_name,
    password_hash,
  };
  let user = state
    .store
    .write(move |repo| users::update(repo, actor, id, update))
    .await?;
  // Tokens are bound to the email address, so a rename needs a fresh one.
  let token = state.signer.issue(&user)?;
  Ok(Json(json!({ "user": user, "token": token })))
}

/// `DELETE /users/{id}`
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
    .write(move |repo| users::delete(repo, actor, id))
    .await?;
  Ok(Json(json!({ "deleted": id })))
}
