use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use url::Url;

use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::model::PersonId;
use crate::storage::PostgresConfig;

#[derive(Parser)]
#[command(name = "swapi-loader")]
#[command(about = "Load SWAPI people and their resolved references into PostgreSQL")]
#[command(version)]
pub struct Cli {
  /// PostgreSQL host
  #[arg(long, env = "PG_HOST", default_value = "localhost")]
  pub pg_host: String,

  /// PostgreSQL port
  #[arg(long, env = "PG_PORT", default_value_t = 5432)]
  pub pg_port: u16,

  /// PostgreSQL user
  #[arg(long, env = "PG_USER", default_value = "postgres")]
  pub pg_user: String,

  /// PostgreSQL password
  #[arg(long, env = "PG_PASS", default_value = "", hide_env_values = true)]
  pub pg_pass: String,

  /// PostgreSQL database name
  #[arg(long, env = "PG_DB", default_value = "postgres")]
  pub pg_db: String,

  /// SWAPI root URL
  #[arg(long, env = "SWAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
  pub base_url: String,

  /// Explicit person ids, comma separated (overrides --from/--to)
  #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(PersonId).range(1..))]
  pub ids: Vec<PersonId>,

  /// First person id of an inclusive range
  #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(PersonId).range(1..))]
  pub from: PersonId,

  /// Last person id of an inclusive range
  #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(PersonId).range(1..))]
  pub to: PersonId,

  /// Maximum HTTP requests in flight
  #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
  pub max_concurrent_requests: u64,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = 30)]
  pub timeout_secs: u64,

  /// Maximum database connections
  #[arg(long, default_value_t = 5)]
  pub max_connections: u32,

  /// Enable verbose logging
  #[arg(short, long)]
  pub verbose: bool,
}

/// Everything one run needs, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  pub ids: Vec<PersonId>,
  pub client: ClientConfig,
  pub postgres: PostgresConfig,
  pub verbose: bool,
}

impl LoaderConfig {
  pub fn from_cli(cli: Cli) -> Result<Self> {
    let ids = resolve_ids(&cli.ids, cli.from, cli.to)?;

    Url::parse(&cli.base_url).with_context(|| format!("invalid base URL: {}", cli.base_url))?;

    let database_url =
      database_url(&cli.pg_host, cli.pg_port, &cli.pg_user, &cli.pg_pass, &cli.pg_db)?;

    Ok(Self {
      ids,
      client: ClientConfig {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        max_concurrent_requests: cli.max_concurrent_requests as usize,
      },
      postgres: PostgresConfig {
        database_url,
        max_connections: cli.max_connections,
        ..Default::default()
      },
      verbose: cli.verbose,
    })
  }
}

fn resolve_ids(explicit: &[PersonId], from: PersonId, to: PersonId) -> Result<Vec<PersonId>> {
  if !explicit.is_empty() {
    return Ok(explicit.to_vec());
  }
  if from > to {
    bail!("--from ({from}) must not be greater than --to ({to})");
  }
  Ok((from..=to).collect())
}

/// Load `KEY=value` pairs from a `.env` file into the process environment so
/// the `env` fallbacks on [`Cli`] can see them. Variables already set win.
///
/// With no explicit path the file is searched for from the current directory
/// upwards. Returns the file that was read, or `None` when there is none.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
  let loaded = match path {
    Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
    None => dotenvy::dotenv(),
  };

  match loaded {
    Ok(path) => Ok(Some(path)),
    Err(e) if e.not_found() => Ok(None),
    Err(e) => Err(e).context("failed to read .env file"),
  }
}

/// Render a `postgres://` URL, percent-encoding the credentials.
pub fn database_url(host: &str, port: u16, user: &str, pass: &str, db: &str) -> Result<String> {
  let mut url = Url::parse("postgres://localhost").context("static URL")?;
  url.set_host(Some(host)).with_context(|| format!("invalid database host: {host}"))?;
  url.set_port(Some(port)).map_err(|_| anyhow!("cannot set database port"))?;
  url.set_username(user).map_err(|_| anyhow!("cannot set database user"))?;
  if !pass.is_empty() {
    url.set_password(Some(pass)).map_err(|_| anyhow!("cannot set database password"))?;
  }
  url.set_path(&format!("/{db}"));
  Ok(url.to_string())
}
