//! In-process recipe server implementing the `recipes` and `addRecipe`
//! operations, with a request log and outage injection for tests.

use super::{GraphqlTransport, TransportError, TransportResult};
use crate::graphql::{GraphqlRequest, GraphqlResponse};
use crate::model::recipe::{NewRecipe, Recipe, RecipeId, RecipeRecord};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fake GraphQL server backed by an in-memory recipe table.
#[derive(Debug, Default)]
pub struct InMemoryRecipeServer {
    recipes: RefCell<Vec<Recipe>>,
    requests: RefCell<Vec<GraphqlRequest>>,
    // operation name -> number of upcoming requests to fail
    outages: RefCell<BTreeMap<String, usize>>,
}

impl InMemoryRecipeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let server = Self::new();
        server.recipes.borrow_mut().extend(recipes);
        server
    }

    /// Fails the next `times` requests for `operation` as unreachable.
    pub fn fail_operation(&self, operation: &str, times: usize) {
        self.outages
            .borrow_mut()
            .insert(operation.to_string(), times);
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes.borrow().clone()
    }

    fn take_outage(&self, operation: &str) -> bool {
        let mut outages = self.outages.borrow_mut();
        match outages.get_mut(operation) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn list_recipes(&self, variables: &Value) -> GraphqlResponse {
        let Some(vegetarian) = variables.get("vegetarian").and_then(Value::as_bool) else {
            return GraphqlResponse::with_error(
                "Variable \"$vegetarian\" of required type \"Boolean!\" was not provided.",
            );
        };

        let recipes = self
            .recipes
            .borrow()
            .iter()
            .filter(|recipe| recipe.vegetarian == vegetarian)
            .map(Recipe::to_record)
            .collect::<Vec<RecipeRecord>>();
        GraphqlResponse::with_data(json!({ "recipes": recipes }))
    }

    fn add_recipe(&self, variables: &Value) -> GraphqlResponse {
        let input = match variables
            .get("recipe")
            .cloned()
            .map(serde_json::from_value::<NewRecipe>)
        {
            Some(Ok(input)) => input,
            Some(Err(err)) => {
                return GraphqlResponse::with_error(format!("Invalid RecipeInput: {err}"))
            }
            None => {
                return GraphqlResponse::with_error(
                    "Variable \"$recipe\" of required type \"RecipeInput!\" was not provided.",
                )
            }
        };

        let recipe = Recipe {
            id: RecipeId::new(Uuid::new_v4().to_string()),
            title: input.title,
            vegetarian: input.vegetarian,
        };
        let record = recipe.to_record();
        self.recipes.borrow_mut().push(recipe);
        GraphqlResponse::with_data(json!({ "addRecipe": record }))
    }
}

impl GraphqlTransport for InMemoryRecipeServer {
    fn execute(&self, request: &GraphqlRequest) -> TransportResult<GraphqlResponse> {
        self.requests.borrow_mut().push(request.clone());
        let operation = request.operation_name.clone().unwrap_or_default();

        if self.take_outage(&operation) {
            return Err(TransportError::Unavailable(format!(
                "connection refused while executing `{operation}`"
            )));
        }

        if request.query.contains("@client") {
            return Ok(GraphqlResponse::with_error(
                "Unknown directive \"@client\".",
            ));
        }

        let response = match operation.as_str() {
            "recipes" => self.list_recipes(&request.variables),
            "addRecipe" => self.add_recipe(&request.variables),
            other => GraphqlResponse::with_error(format!("Unknown operation `{other}`.")),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRecipeServer;
    use crate::graphql::GraphqlRequest;
    use crate::model::recipe::{Recipe, RecipeId};
    use crate::transport::{GraphqlTransport, TransportError};
    use serde_json::json;

    fn request(operation: &str, query: &str, variables: serde_json::Value) -> GraphqlRequest {
        GraphqlRequest {
            operation_name: Some(operation.to_string()),
            query: query.to_string(),
            variables,
        }
    }

    #[test]
    fn list_filters_by_vegetarian_flag() {
        let server = InMemoryRecipeServer::with_recipes([
            Recipe {
                id: RecipeId::from("1"),
                title: "Stew".to_string(),
                vegetarian: false,
            },
            Recipe {
                id: RecipeId::from("2"),
                title: "Salad".to_string(),
                vegetarian: true,
            },
        ]);

        let data = server
            .execute(&request("recipes", "query recipes", json!({ "vegetarian": true })))
            .unwrap()
            .into_data("recipes")
            .unwrap();

        assert_eq!(data, json!({ "recipes": [{ "id": "2", "title": "Salad" }] }));
    }

    #[test]
    fn client_directive_is_rejected() {
        let server = InMemoryRecipeServer::new();
        let response = server
            .execute(&request(
                "recipes",
                "query recipes { recipes { isStarred @client } }",
                json!({ "vegetarian": false }),
            ))
            .unwrap();
        assert!(!response.errors.is_empty());
    }

    #[test]
    fn injected_outage_fails_only_requested_count() {
        let server = InMemoryRecipeServer::new();
        server.fail_operation("recipes", 1);
        let list = request("recipes", "query recipes", json!({ "vegetarian": false }));

        let err = server.execute(&list).unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)));
        assert!(server.execute(&list).is_ok());
        assert_eq!(server.requests().len(), 2);
    }
}
