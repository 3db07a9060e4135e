//! In-memory storage for tests and dry runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::error::{LoaderError, LoaderResult};
use crate::model::{PersonId, PersonRow};
use crate::schema::PEOPLE_TABLE;
use crate::storage::PeopleStore;

/// Mirrors the Postgres table's rules: the schema must exist before inserts
/// and `id` is a primary key.
#[derive(Debug, Default)]
pub struct MemoryPeopleStore {
  rows: RwLock<BTreeMap<PersonId, PersonRow>>,
  schema_ready: AtomicBool,
  closed: AtomicBool,
}

impl MemoryPeopleStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn check_open(&self) -> LoaderResult<()> {
    if self.closed.load(Ordering::SeqCst) {
      return Err(LoaderError::storage("store is closed"));
    }
    Ok(())
  }
}

#[async_trait]
impl PeopleStore for MemoryPeopleStore {
  async fn ensure_schema(&self) -> LoaderResult<()> {
    self.check_open()?;
    self.schema_ready.store(true, Ordering::SeqCst);
    Ok(())
  }

  async fn insert(&self, row: &PersonRow) -> LoaderResult<()> {
    self.check_open()?;
    if !self.schema_ready.load(Ordering::SeqCst) {
      return Err(LoaderError::storage(format!(
        "relation \"{}\" does not exist",
        PEOPLE_TABLE.name
      )));
    }

    let mut rows = self.rows.write().await;
    if rows.contains_key(&row.id) {
      return Err(LoaderError::storage(format!(
        "duplicate key value violates unique constraint: id={}",
        row.id
      )));
    }
    rows.insert(row.id, row.clone());
    Ok(())
  }

  async fn rows(&self) -> LoaderResult<Vec<PersonRow>> {
    self.check_open()?;
    Ok(self.rows.read().await.values().cloned().collect())
  }

  async fn close(&self) {
    self.closed.store(true, Ordering::SeqCst);
  }
}
