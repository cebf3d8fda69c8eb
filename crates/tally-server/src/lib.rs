//! Configuration and application assembly for the Tally server binary.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use serde::Deserialize;
use tally_api::AppState;
use tally_core::store::Store;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TALLY_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_database_path")]
  pub database_path:        PathBuf,
  /// Key used to sign bearer tokens.
  pub secret_key:           String,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_secs: u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_database_path() -> PathBuf { PathBuf::from("tally.db") }

fn default_request_timeout() -> u64 { 30 }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  match (s.strip_prefix("~/"), std::env::var("HOME")) {
    (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing and a per-request timeout.
pub fn app<S>(state: AppState<S>, config: &ServerConfig) -> Router
where
  S: Store + 'static,
{
  tally_api::router(state)
    .layer(TimeoutLayer::new(config.request_timeout()))
    .layer(TraceLayer::new_for_http())
}
