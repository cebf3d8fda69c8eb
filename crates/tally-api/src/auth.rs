//! Bearer-token identity and password hashing.
//!
//! A token is `base64url(claims) "." hex(hmac_sha256(base64url(claims)))`.
//! Tokens carry no expiry; changing the server's secret key revokes them all.
//! A token also stops working once its user is deleted or changes email.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as B64};
use chrono::Utc;
use hmac::{Hmac, Mac, digest::InvalidLength};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tally_core::{model::User, store::Store};

use crate::{AppState, error::ApiError};

type HmacSha256 = Hmac<Sha256>;

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// What a token asserts about its bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub sub:   i64,
  pub email: String,
  pub iat:   i64,
}

/// Issues and verifies tokens under one secret key.
#[derive(Clone)]
pub struct TokenSigner {
  mac: HmacSha256,
}

impl TokenSigner {
  pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, InvalidLength> {
    Ok(Self {
      mac: HmacSha256::new_from_slice(secret.as_ref())?,
    })
  }

  fn sign(&self, payload: &str) -> HmacSha256 {
    let mut mac = self.mac.clone();
    mac.update(payload.as_bytes());
    mac
  }

  pub fn issue(&self, user: &User) -> Result<String, ApiError> {
    let claims = Claims {
      sub:   user.id,
      email: user.email_address.clone(),
      iat:   Utc::now().timestamp(),
    };
    let json =
      serde_json::to_vec(&claims).map_err(|e| ApiError::Signing(e.to_string()))?;
    let payload = B64.encode(json);
    let signature = hex::encode(self.sign(&payload).finalize().into_bytes());
    Ok(format!("{payload}.{signature}"))
  }

  pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
    let (payload, signature) =
      token.split_once('.').ok_or(ApiError::InvalidToken)?;
    let signature = hex::decode(signature).map_err(|_| ApiError::InvalidToken)?;
    self
      .sign(payload)
      .verify_slice(&signature)
      .map_err(|_| ApiError::InvalidToken)?;

    let json = B64.decode(payload).map_err(|_| ApiError::InvalidToken)?;
    serde_json::from_slice(&json).map_err(|_| ApiError::InvalidToken)
  }
}

// ─── Identity extractor ──────────────────────────────────────────────────────

/// The authenticated user's id, taken from `Authorization: Bearer <token>`.
///
/// The claims must still describe a stored user: same id, same email.
pub struct Identity(pub i64);

impl<S> FromRequestParts<AppState<S>> for Identity
where
  S: Store + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let value = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError::MissingToken)?;
    let token = value
      .strip_prefix("Bearer ")
      .or_else(|| value.strip_prefix("bearer "))
      .ok_or(ApiError::InvalidToken)?;

    let claims = state.signer.verify(token.trim())?;
    let sub = claims.sub;
    let user = state.store.read(move |repo| repo.get_user(sub)).await?;
    match user {
      Some(user) if user.email_address == claims.email => Ok(Identity(user.id)),
      _ => Err(ApiError::InvalidToken),
    }
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash `password` into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Hash(e.to_string()))
}

/// Hash on the blocking pool; argon2 is deliberately slow.
pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
  tokio::task::spawn_blocking(move || hash_password(&password))
    .await
    .map_err(|e| ApiError::Hash(e.to_string()))?
}

/// `true` if `password` matches the stored PHC string. A malformed hash never
/// matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
  PasswordHash::new(hash).is_ok_and(|parsed| {
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  })
}
