//! GraphQL documents and wire envelopes.
//!
//! # Responsibility
//! - Own the operation documents used by the client.
//! - Split `@client` fields from the text that reaches the server.
//! - Define request/response envelopes shared by all transports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod documents;

pub use documents::{ClientDocument, ADD_RECIPE, GET_RECIPES, UPDATE_RECIPE_STARRED};

/// POST body sent to a GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub query: String,
    pub variables: Value,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Decoded GraphQL response body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![GraphqlError {
                message: message.into(),
            }],
        }
    }
}
