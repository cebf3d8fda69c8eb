//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the router as `{"error": {"message", "status"}}`.
//! Store failures are logged in full and replaced by a generic message.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::error::ErrorKind;
use thiserror::Error;
use tracing::{error, warn};

/// An error returned by an API handler or extractor.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] tally_core::Error),

  #[error("authorization token required")]
  MissingToken,

  #[error("invalid authorization token")]
  InvalidToken,

  #[error("password hashing failed: {0}")]
  Hash(String),

  #[error("token signing failed: {0}")]
  Signing(String),

  #[error("{0}")]
  Body(#[from] JsonRejection),

  #[error("{0}")]
  Path(#[from] PathRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Core(e) => match e.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      },
      Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
      Self::Hash(_) | Self::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Self::Body(_) | Self::Path(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = if status.is_server_error() {
      error!(error = %self, "request failed");
      "internal server error".to_owned()
    } else {
      if status == StatusCode::UNAUTHORIZED {
        warn!(reason = %self, "request denied");
      }
      self.to_string()
    };

    let body = json!({
      "error": { "message": message, "status": status.as_u16() }
    });
    (status, Json(body)).into_response()
  }
}
