use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Instant;
use swapi_loader::config::{load_env_file, Cli, LoaderConfig};
use swapi_loader::{run, PeopleStore, PostgresPeopleStore, RunReport, SwapiClient};

#[tokio::main]
async fn main() -> Result<()> {
  let started = Instant::now();
  let env_file = load_env_file(None)?;
  let config = LoaderConfig::from_cli(Cli::parse())?;
  bentley::init_tracing(config.verbose);
  if config.verbose {
    if let Some(path) = &env_file {
      bentley::debug!(&format!("read environment from {}", path.display()));
    }
    bentley::verbose!(&format!("{:?}", config.postgres));
  }
  bentley::info!(&format!(
    "loading {} person record(s) from {}",
    config.ids.len(),
    config.client.base_url
  ));

  let outcome = load(&config).await;
  println!("{}", bentley::elapsed(started.elapsed()));
  let report = outcome?;

  for failure in &report.failures {
    bentley::error!(&format!(
      "person {} failed during {}: {}",
      failure.id, failure.stage, failure.error
    ));
  }
  if !report.is_success() {
    bail!("{} of {} person record(s) failed", report.failures.len(), config.ids.len());
  }
  bentley::success!(&format!("stored {} person record(s)", report.stored.len()));
  Ok(())
}

async fn load(config: &LoaderConfig) -> Result<RunReport> {
  let client = SwapiClient::new(config.client.clone())?;
  let store = PostgresPeopleStore::connect(&config.postgres)
    .await
    .context("failed to connect to PostgreSQL")?;
  let outcome = run(&client, &store, &config.ids).await;
  store.close().await;
  outcome.context("load aborted")
}
