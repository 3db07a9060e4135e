//! PostgreSQL storage implementation.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::LoaderResult;
use crate::model::PersonRow;
use crate::schema::PEOPLE_TABLE;
use crate::storage::PeopleStore;

/// PostgreSQL configuration options.
#[derive(Clone)]
pub struct PostgresConfig {
  /// Database connection URL.
  pub database_url: String,
  /// Maximum number of connections in the pool.
  pub max_connections: u32,
  /// Connection timeout in seconds.
  pub connect_timeout_secs: u64,
}

// Hide credentials in database_url
impl std::fmt::Debug for PostgresConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PostgresConfig")
      .field("database_url", &"[REDACTED]")
      .field("max_connections", &self.max_connections)
      .field("connect_timeout_secs", &self.connect_timeout_secs)
      .finish()
  }
}

impl Default for PostgresConfig {
  fn default() -> Self {
    Self {
      database_url: "postgres://localhost/postgres".to_string(),
      max_connections: 5,
      connect_timeout_secs: 30,
    }
  }
}

fn text(row: &PgRow, column: &str) -> LoaderResult<Option<String>> {
  Ok(row.try_get(column)?)
}

fn row_to_person(row: PgRow) -> LoaderResult<PersonRow> {
  Ok(PersonRow {
    id: row.try_get("id")?,
    name: text(&row, "name")?,
    birth_year: text(&row, "birth_year")?,
    eye_color: text(&row, "eye_color")?,
    films: text(&row, "films")?.unwrap_or_default(),
    gender: text(&row, "gender")?,
    hair_color: text(&row, "hair_color")?,
    height: text(&row, "height")?,
    homeworld: text(&row, "homeworld")?.unwrap_or_default(),
    mass: text(&row, "mass")?,
    skin_color: text(&row, "skin_color")?,
    species: text(&row, "species")?.unwrap_or_default(),
    starships: text(&row, "starships")?.unwrap_or_default(),
    vehicles: text(&row, "vehicles")?.unwrap_or_default(),
  })
}

/// PostgreSQL implementation of PeopleStore.
pub struct PostgresPeopleStore {
  pool: PgPool,
}

impl PostgresPeopleStore {
  /// Wrap an existing pool.
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Open a pool with the given configuration.
  #[instrument(skip(config))]
  pub async fn connect(config: &PostgresConfig) -> LoaderResult<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
      .connect(&config.database_url)
      .await?;

    Ok(Self::new(pool))
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl PeopleStore for PostgresPeopleStore {
  async fn ensure_schema(&self) -> LoaderResult<()> {
    let sql = PEOPLE_TABLE.create_table_sql();
    debug!(table = PEOPLE_TABLE.name, "ensuring schema");
    sqlx::query(&sql).execute(&self.pool).await?;
    Ok(())
  }

  async fn insert(&self, row: &PersonRow) -> LoaderResult<()> {
    let sql = PEOPLE_TABLE.insert_sql();
    let mut tx = self.pool.begin().await?;

    let mut query = sqlx::query(&sql).bind(row.id);
    for (_, value) in row.text_values() {
      query = query.bind(value);
    }
    query.execute(&mut *tx).await?;

    tx.commit().await?;
    debug!(id = row.id, "row committed");
    Ok(())
  }

  async fn rows(&self) -> LoaderResult<Vec<PersonRow>> {
    let sql = PEOPLE_TABLE.select_sql();
    let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
    rows.into_iter().map(row_to_person).collect()
  }

  async fn close(&self) {
    self.pool.close().await;
  }
}
