use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
  #[error("Resource not found: {url}")]
  NotFound { url: String },

  #[error("Request to {url} failed: {message}")]
  Network { url: String, message: String },

  #[error("Failed to decode response from {url}: {message}")]
  Decode { url: String, message: String },

  #[error("Storage failure: {message}")]
  Storage { message: String },
}

impl LoaderError {
  pub fn not_found(url: impl Into<String>) -> Self {
    Self::NotFound { url: url.into() }
  }

  pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Network { url: url.into(), message: message.into() }
  }

  pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Decode { url: url.into(), message: message.into() }
  }

  pub fn storage(message: impl Into<String>) -> Self {
    Self::Storage { message: message.into() }
  }
}

impl From<sqlx::Error> for LoaderError {
  fn from(err: sqlx::Error) -> Self {
    Self::storage(err.to_string())
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages_name_the_url() {
    let err = LoaderError::not_found("https://swapi.dev/api/people/99/");
    assert_eq!(err.to_string(), "Resource not found: https://swapi.dev/api/people/99/");

    let err = LoaderError::decode("http://x/films/1/", "expected value at line 1 column 1");
    assert!(err.to_string().contains("http://x/films/1/"));
    assert!(err.to_string().contains("expected value"));
  }

  #[test]
  fn test_sqlx_errors_become_storage_errors() {
    let err: LoaderError = sqlx::Error::PoolClosed.into();
    match err {
      LoaderError::Storage { message } => assert!(!message.is_empty()),
      other => panic!("Expected Storage error, got: {other:?}"),
    }
  }
}
