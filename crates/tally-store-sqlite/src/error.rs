//! Error type for opening a `tally-store-sqlite` database.
//!
//! Failures inside a unit of work are reported as [`tally_core::Error`];
//! this type only covers getting a usable connection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error(
    "database schema version {found} is newer than this build supports \
     ({supported})"
  )]
  SchemaTooNew { found: i64, supported: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
