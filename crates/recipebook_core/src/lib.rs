//! Core logic for the recipe book client.
//!
//! Lists recipes from a GraphQL server, adds new ones, and keeps a
//! client-side starred flag in durable local storage, merged into every
//! list read as the `isStarred` field.

pub mod cache;
pub mod client;
pub mod config;
pub mod db;
pub mod graphql;
pub mod logging;
pub mod model;
pub mod starred;
pub mod status;
pub mod storage;
pub mod transport;

pub use client::{
    ClientError, ClientResult, FetchPolicy, MutationOutcome, RecipeClient, RefetchedLists,
    REFETCH_PARTITIONS,
};
pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::recipe::{
    NewRecipe, Recipe, RecipeId, RecipeRecord, RecipeValidationError, RecipeView, StarredSet,
};
pub use starred::{StarredResult, StarredStore, STARRED_STORAGE_KEY};
pub use status::{RequestKind, RequestState};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use transport::{
    GraphqlTransport, HttpTransport, InMemoryRecipeServer, TransportError, TransportResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
