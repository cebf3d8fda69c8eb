//! Request extractors whose rejections use the API error envelope.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body.
///
/// As `Option<Body<T>>` a request without a `Content-Type` yields `None`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Body<T>(pub T);

impl<T, S> OptionalFromRequest<S> for Body<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(
    req: Request,
    state: &S,
  ) -> Result<Option<Self>, Self::Rejection> {
    let json = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
      .await?;
    Ok(json.map(|Json(value)| Body(value)))
  }
}

/// Typed path parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Params<T>(pub T);
