//! Recipe client facade.
//!
//! # Responsibility
//! - Run list queries through the normalized cache and the `isStarred`
//!   resolver.
//! - Send server-bound mutations over the transport and resolve the
//!   client-only starred mutation locally.
//! - Hand every successful mutation to the refresh coordinator.
//!
//! # Invariants
//! - `@client` fields are stripped before any request reaches the transport.
//! - `isStarred` is resolved from the store on every read, never cached.
//! - A failed mutation never triggers a refetch.

use crate::cache::NormalizedCache;
use crate::graphql::{ClientDocument, GraphqlRequest, ADD_RECIPE, GET_RECIPES};
use crate::model::recipe::{
    NewRecipe, RecipeId, RecipeRecord, RecipeValidationError, RecipeView,
};
use crate::starred::{resolve_recipes, update_recipe_starred, StarredResult, StarredStore};
use crate::storage::{KeyValueStorage, StorageError};
use crate::transport::{GraphqlTransport, TransportError, TransportResult};
use log::{error, info};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod refresh;

pub use refresh::{MutationOutcome, RefetchedLists, REFETCH_PARTITIONS};

static RECIPES_DOC: Lazy<ClientDocument> = Lazy::new(|| ClientDocument::parse(GET_RECIPES));
static ADD_RECIPE_DOC: Lazy<ClientDocument> = Lazy::new(|| ClientDocument::parse(ADD_RECIPE));

const STARRED_FIELD: &str = "isStarred";

pub type ClientResult<T> = Result<T, ClientError>;

/// Client-level failures surfaced to callers.
#[derive(Debug)]
pub enum ClientError {
    Validation(RecipeValidationError),
    Storage(StorageError),
    Transport(TransportError),
    /// Post-mutation refetch of one list partition failed; the mutation
    /// itself already succeeded.
    Refetch {
        vegetarian: bool,
        source: TransportError,
    },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "{err}"),
            Self::Refetch { vegetarian, source } => {
                write!(f, "refetch of recipes(vegetarian: {vegetarian}) failed: {source}")
            }
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Refetch { source, .. } => Some(source),
        }
    }
}

impl From<RecipeValidationError> for ClientError {
    fn from(value: RecipeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for ClientError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

/// Where a list query reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve from the cache when the partition was fetched before.
    #[default]
    CacheFirst,
    /// Always hit the server and overwrite the cached partition.
    NetworkOnly,
}

#[derive(Deserialize)]
struct RecipesData {
    recipes: Vec<RecipeRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRecipeData {
    add_recipe: RecipeRecord,
}

/// Single-threaded recipe client over an injected transport and storage.
pub struct RecipeClient<T: GraphqlTransport, S: KeyValueStorage> {
    transport: T,
    starred: StarredStore<S>,
    cache: NormalizedCache,
}

impl<T: GraphqlTransport, S: KeyValueStorage> RecipeClient<T, S> {
    pub fn new(transport: T, storage: S) -> Self {
        Self {
            transport,
            starred: StarredStore::new(storage),
            cache: NormalizedCache::new(),
        }
    }

    /// Lists recipes for one vegetarian partition, cache-first.
    pub fn recipes(&mut self, vegetarian: bool) -> ClientResult<Vec<RecipeView>> {
        self.query_recipes(vegetarian, FetchPolicy::CacheFirst)
    }

    /// Lists recipes for one vegetarian partition with an explicit policy.
    pub fn query_recipes(
        &mut self,
        vegetarian: bool,
        policy: FetchPolicy,
    ) -> ClientResult<Vec<RecipeView>> {
        let cached = match policy {
            FetchPolicy::CacheFirst => self.cache.read_list(vegetarian),
            FetchPolicy::NetworkOnly => None,
        };
        let records = match cached {
            Some(records) => records,
            None => self.fetch_list(vegetarian)?,
        };
        Ok(self.resolve(&records))
    }

    /// Creates a recipe on the server, then refreshes both list partitions.
    pub fn add_recipe(&mut self, input: &NewRecipe) -> ClientResult<MutationOutcome<RecipeRecord>> {
        input.validate()?;

        let request = server_request(&ADD_RECIPE_DOC, json!({ "recipe": input }))?;
        let created = self
            .send::<AddRecipeData>(&request)
            .map(|data| data.add_recipe)
            .map_err(|err| {
                error!(
                    "event=recipe_add module=client status=error vegetarian={} error={err}",
                    input.vegetarian
                );
                err
            })?;

        self.cache.write_entity(&created);
        info!(
            "event=recipe_add module=client status=ok id={} vegetarian={}",
            created.id, input.vegetarian
        );
        Ok(self.settle("addRecipe", created))
    }

    /// Sets the starred state of `id` locally, then refreshes both partitions.
    pub fn update_recipe_starred(
        &mut self,
        id: &RecipeId,
        is_starred: bool,
    ) -> ClientResult<MutationOutcome<StarredResult>> {
        let result = update_recipe_starred(&self.starred, id, is_starred)?;
        Ok(self.settle("updateRecipeStarred", result))
    }

    pub fn starred(&self) -> &StarredStore<S> {
        &self.starred
    }

    pub fn cache(&self) -> &NormalizedCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn fetch_list(&mut self, vegetarian: bool) -> TransportResult<Vec<RecipeRecord>> {
        let request = server_request(&RECIPES_DOC, json!({ "vegetarian": vegetarian }))?;
        let data = self.send::<RecipesData>(&request)?;
        self.cache.write_list(vegetarian, &data.recipes);
        info!(
            "event=recipes_fetch module=client status=ok vegetarian={vegetarian} count={}",
            data.recipes.len()
        );
        Ok(data.recipes)
    }

    fn resolve(&self, records: &[RecipeRecord]) -> Vec<RecipeView> {
        resolve_recipes(
            &self.starred,
            records,
            RECIPES_DOC.requests_client_field(STARRED_FIELD),
        )
    }

    fn send<D: DeserializeOwned>(&self, request: &GraphqlRequest) -> TransportResult<D> {
        let operation = request.operation_name.as_deref().unwrap_or("anonymous");
        let data = self.transport.execute(request)?.into_data(operation)?;
        serde_json::from_value(data).map_err(|err| TransportError::Decode {
            operation: operation.to_string(),
            message: err.to_string(),
        })
    }
}

fn server_request(document: &ClientDocument, variables: Value) -> TransportResult<GraphqlRequest> {
    let operation = document.operation_name().unwrap_or("anonymous");
    let query = document.server_text().ok_or_else(|| TransportError::Decode {
        operation: operation.to_string(),
        message: "operation has no server-resolved fields".to_string(),
    })?;

    Ok(GraphqlRequest {
        operation_name: document.operation_name().map(str::to_string),
        query: query.to_string(),
        variables,
    })
}
