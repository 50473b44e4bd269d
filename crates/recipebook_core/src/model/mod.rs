//! Recipe domain model shared by the store, cache and client layers.
//!
//! # Responsibility
//! - Define the server-owned recipe entity and its wire projections.
//! - Keep the client-only `isStarred` field out of the server shapes.
//!
//! # Invariants
//! - Every recipe is identified by a stable, server-assigned `RecipeId`.
//! - `vegetarian` is fixed at creation time.

pub mod recipe;
