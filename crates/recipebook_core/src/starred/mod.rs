//! Client-side starred state.
//!
//! # Responsibility
//! - Persist the starred id set in one durable slot (`store`).
//! - Derive `isStarred` for recipes read by list queries (`resolver`).
//! - Handle the client-only `updateRecipeStarred` mutation (`mutation`).
//!
//! # Invariants
//! - `isStarred(id) == StarredSet.contains(id)` before and after every toggle.
//! - Nothing in this module touches the network.

pub mod mutation;
pub mod resolver;
pub mod store;

pub use mutation::{update_recipe_starred, StarredResult};
pub use resolver::{resolve_is_starred, resolve_recipes};
pub use store::{StarredStore, STARRED_STORAGE_KEY};
