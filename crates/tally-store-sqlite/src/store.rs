//! [`SqliteStore`]: the SQLite implementation of [`Store`].

use std::{path::Path, time::Duration};

use rusqlite::TransactionBehavior;
use tally_core::store::{Repository, Store};
use tracing::debug;

use crate::{
  Error, Result,
  repo::SqliteRepo,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tally store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let version = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        Ok(version)
      })
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::SchemaTooNew {
        found,
        supported: SCHEMA_VERSION,
      });
    }

    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!(version = SCHEMA_VERSION, "schema ready");
    Ok(())
  }
}

// ─── Store impl ──────────────────────────────────────────────────────────────

impl Store for SqliteStore {
  async fn read<T, F>(&self, f: F) -> tally_core::Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&dyn Repository) -> tally_core::Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        // Deferred: a consistent snapshot, never committed.
        let tx = conn.transaction()?;
        Ok(f(&SqliteRepo::new(&tx)))
      })
      .await
      .map_err(tally_core::Error::store)?
  }

  async fn write<T, F>(&self, f: F) -> tally_core::Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&dyn Repository) -> tally_core::Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = f(&SqliteRepo::new(&tx));
        // Dropping an uncommitted transaction rolls it back.
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await
      .map_err(tally_core::Error::store)?
  }
}
