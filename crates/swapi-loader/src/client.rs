//! HTTP client for the SWAPI people endpoint
//!
//! Fetches a person, fans out over every reference URL it carries and hands
//! the result to the flattener. All requests share one `reqwest::Client`, a
//! semaphore bounding how many are in flight, and a per-URL memo so a planet
//! shared by many people is only downloaded once.

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell, Semaphore};
use tracing::debug;

use crate::error::{LoaderError, LoaderResult};
use crate::flatten::flatten;
use crate::model::{Person, PersonId, PersonRow, Reference, ReferenceGroup, ResolvedReferences};

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Configuration for the SWAPI HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// API root, e.g. "https://swapi.dev/api"
  pub base_url: String,
  /// Per-request timeout in seconds
  pub timeout_secs: u64,
  /// Upper bound on requests in flight across all fetches
  pub max_concurrent_requests: usize,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(), timeout_secs: 30, max_concurrent_requests: 16 }
  }
}

/// Anything that can turn a person id into a flattened row.
#[async_trait]
pub trait PersonSource: Send + Sync {
  async fn fetch(&self, id: PersonId) -> LoaderResult<PersonRow>;
}

pub struct SwapiClient {
  client: Client,
  config: ClientConfig,
  permits: Semaphore,
  references: Mutex<HashMap<String, Arc<OnceCell<Reference>>>>,
}

impl SwapiClient {
  /// Build a client with its own connection pool
  pub fn new(config: ClientConfig) -> LoaderResult<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("swapi-loader/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| LoaderError::network(&config.base_url, format!("failed to build client: {e}")))?;

    Ok(Self::with_http_client(client, config))
  }

  /// Wrap an existing `reqwest::Client`
  pub fn with_http_client(client: Client, config: ClientConfig) -> Self {
    let permits = Semaphore::new(config.max_concurrent_requests.max(1));
    Self { client, config, permits, references: Mutex::new(HashMap::new()) }
  }

  pub fn person_url(&self, id: PersonId) -> String {
    format!("{}/people/{}/", self.config.base_url.trim_end_matches('/'), id)
  }

  /// Fetch the raw person record
  pub async fn fetch_person(&self, id: PersonId) -> LoaderResult<Person> {
    self.get_json(&self.person_url(id)).await
  }

  /// Resolve all five reference groups concurrently.
  ///
  /// `try_join_all` yields results in input order, so each group keeps the
  /// order the API listed its URLs in regardless of arrival order. A
  /// reference lacking its group's display field is a decode error.
  pub async fn resolve_references(&self, person: &Person) -> LoaderResult<ResolvedReferences> {
    let groups = ReferenceGroup::ALL.map(|group| {
      let urls = person.references(group);
      async move {
        let names = try_join_all(urls.iter().map(|url| self.display_name(group, url))).await?;
        Ok::<_, LoaderError>((group, names))
      }
    });

    let mut resolved = ResolvedReferences::default();
    for (group, names) in try_join_all(groups).await? {
      *resolved.group_mut(group) = names;
    }
    Ok(resolved)
  }

  async fn display_name(&self, group: ReferenceGroup, url: &str) -> LoaderResult<String> {
    let reference = self.reference(url).await?;
    match reference.display(group) {
      Some(name) => Ok(name.to_string()),
      None => Err(LoaderError::decode(url, format!("missing `{}`", group.display_field().key()))),
    }
  }

  /// Fetch one reference, at most once per URL for the lifetime of the client
  async fn reference(&self, url: &str) -> LoaderResult<Reference> {
    let cell = {
      let mut cache = self.references.lock().await;
      cache.entry(url.to_string()).or_default().clone()
    };

    cell.get_or_try_init(|| self.get_json::<Reference>(url)).await.cloned()
  }

  async fn get_json<T: DeserializeOwned>(&self, url: &str) -> LoaderResult<T> {
    let _permit = self
      .permits
      .acquire()
      .await
      .map_err(|_| LoaderError::network(url, "request limiter closed"))?;

    debug!(%url, "GET");
    let response =
      self.client.get(url).send().await.map_err(|e| LoaderError::network(url, e.to_string()))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Err(LoaderError::not_found(url));
    }
    if !status.is_success() {
      return Err(LoaderError::network(url, format!("HTTP {status}")));
    }

    let body = response.text().await.map_err(|e| LoaderError::network(url, e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| LoaderError::decode(url, e.to_string()))
  }
}

#[async_trait]
impl PersonSource for SwapiClient {
  async fn fetch(&self, id: PersonId) -> LoaderResult<PersonRow> {
    let person = self.fetch_person(id).await?;
    let references = self.resolve_references(&person).await?;
    Ok(flatten(id, &person, &references))
  }
}
