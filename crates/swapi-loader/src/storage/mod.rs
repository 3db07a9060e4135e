use async_trait::async_trait;

use crate::error::LoaderResult;
use crate::model::PersonRow;

pub mod memory;
pub mod postgres;

pub use memory::MemoryPeopleStore;
pub use postgres::{PostgresConfig, PostgresPeopleStore};

/// Storage abstraction for flattened people rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleStore: Send + Sync {
  /// Create the people table if it does not exist yet
  async fn ensure_schema(&self) -> LoaderResult<()>;

  /// Insert one row inside its own transaction
  async fn insert(&self, row: &PersonRow) -> LoaderResult<()>;

  /// All stored rows ordered by id
  async fn rows(&self) -> LoaderResult<Vec<PersonRow>>;

  /// Release connections; further calls fail
  async fn close(&self);
}
