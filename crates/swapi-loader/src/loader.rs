//! Batch orchestration: schema, concurrent fetches, ordered persistence.

use futures::future::join_all;
use std::fmt;
use tracing::{debug, info, warn};

use crate::client::PersonSource;
use crate::error::{LoaderError, LoaderResult};
use crate::model::PersonId;
use crate::storage::PeopleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Fetch,
  Store,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Fetch => write!(f, "fetch"),
      Stage::Store => write!(f, "store"),
    }
  }
}

#[derive(Debug)]
pub struct RunFailure {
  pub id: PersonId,
  pub stage: Stage,
  pub error: LoaderError,
}

/// Outcome of one batch. Every requested id lands in exactly one list.
#[derive(Debug, Default)]
pub struct RunReport {
  pub stored: Vec<PersonId>,
  pub failures: Vec<RunFailure>,
}

impl RunReport {
  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }
}

/// Load every id in `ids` into `store`.
///
/// All fetches run concurrently and are settled rather than joined, so one
/// bad id is reported instead of aborting the batch. Rows are then written
/// one transaction each, in the order the ids were given. Only a schema
/// failure aborts the run.
pub async fn run(
  source: &dyn PersonSource,
  store: &dyn PeopleStore,
  ids: &[PersonId],
) -> LoaderResult<RunReport> {
  store.ensure_schema().await?;
  debug!(count = ids.len(), "schema ready, fetching");

  let fetched = join_all(ids.iter().map(|&id| source.fetch(id))).await;

  let mut report = RunReport::default();
  for (&id, result) in ids.iter().zip(fetched) {
    let row = match result {
      Ok(row) => row,
      Err(error) => {
        warn!(id, %error, "fetch failed");
        bentley::warn!(&format!("person {id} skipped: {error}"));
        report.failures.push(RunFailure { id, stage: Stage::Fetch, error });
        continue;
      }
    };

    match store.insert(&row).await {
      Ok(()) => {
        info!(id, name = row.name.as_deref().unwrap_or_default(), "stored");
        bentley::event_info!(&format!(
          "person {id} stored ({})",
          row.name.as_deref().unwrap_or("unnamed")
        ));
        report.stored.push(id);
      }
      Err(error) => {
        warn!(id, %error, "insert failed");
        bentley::event_error!(&format!("person {id}: {error}"));
        report.failures.push(RunFailure { id, stage: Stage::Store, error });
      }
    }
  }

  Ok(report)
}
