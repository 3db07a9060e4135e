//! Pull people from the Star Wars API, resolve the films, homeworld, species,
//! starships and vehicles they link to, and store one flattened row per
//! person in PostgreSQL.

pub mod client;
pub mod config;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod model;
pub mod schema;
pub mod storage;

// Re-export commonly used types for easier testing
pub use client::{ClientConfig, PersonSource, SwapiClient};
pub use error::{LoaderError, LoaderResult};
pub use loader::{run, RunReport};
pub use model::{Person, PersonId, PersonRow, Reference, ReferenceGroup};
pub use storage::{MemoryPeopleStore, PeopleStore, PostgresPeopleStore};
