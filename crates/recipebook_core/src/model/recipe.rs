//! Recipe entity, wire projections and read views.
//!
//! # Responsibility
//! - Model the server entity (`Recipe`) and what the list/add operations
//!   actually return (`RecipeRecord`).
//! - Model the add-recipe input (`NewRecipe`) with minimal validation.
//! - Model the merged read result (`RecipeView`) that carries the locally
//!   resolved `isStarred` field.
//!
//! # Invariants
//! - `RecipeRecord` never carries `isStarred`; the field only exists on
//!   `RecipeView`, built at read time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque, server-assigned recipe identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecipeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Set of currently starred recipe ids. Ordering is irrelevant to callers;
/// `BTreeSet` keeps the persisted array deterministic.
pub type StarredSet = BTreeSet<RecipeId>;

/// Full server-side recipe entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub vegetarian: bool,
}

impl Recipe {
    /// Projects the entity onto the fields the list/add operations select.
    pub fn to_record(&self) -> RecipeRecord {
        RecipeRecord {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// `{ id title }` selection returned by `recipes` and `addRecipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub title: String,
}

/// Input for the `addRecipe` mutation (`RecipeInput` on the server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub vegetarian: bool,
}

impl NewRecipe {
    pub fn new(title: impl Into<String>, vegetarian: bool) -> Self {
        Self {
            title: title.into(),
            vegetarian,
        }
    }

    /// Rejects input the server would store as a blank recipe.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Validation failures for add-recipe input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyTitle,
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "recipe title cannot be empty"),
        }
    }
}

impl Error for RecipeValidationError {}

/// Read result for one list item: server fields merged with local fields.
///
/// `is_starred` is `None` when the executed document did not select
/// `isStarred`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: RecipeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
}

impl RecipeView {
    pub fn is_starred(&self) -> bool {
        self.is_starred.unwrap_or(false)
    }
}
