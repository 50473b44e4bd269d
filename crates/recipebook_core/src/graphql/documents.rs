//! Operation documents and `@client` directive handling.
//!
//! Only the subset of GraphQL syntax these documents use is understood:
//! named operations, field arguments without nested parentheses, and the
//! `@client` directive on leaf or root fields.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recipe list filtered by the vegetarian flag; `isStarred` resolves locally.
pub const GET_RECIPES: &str = r#"
    query recipes($vegetarian: Boolean!) {
        recipes(vegetarian: $vegetarian) {
            id
            title
            isStarred @client
        }
    }
"#;

/// Server-side recipe creation.
pub const ADD_RECIPE: &str = r#"
    mutation addRecipe($recipe: RecipeInput!) {
        addRecipe(recipe: $recipe) {
            id
            title
        }
    }
"#;

/// Client-only starred toggle; never sent to the server.
pub const UPDATE_RECIPE_STARRED: &str = r#"
    mutation updateRecipeStarred($id: ID!, $isStarred: Boolean!) {
        updateRecipeStarred(id: $id, isStarred: $isStarred) @client
    }
"#;

static CLIENT_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)\s*(?:\([^)]*\))?\s*@client\b").expect("valid client field regex")
});
static CLIENT_FIELD_STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]*\w+\s*(?:\([^)]*\))?\s*@client\b[ \t]*\r?\n?")
        .expect("valid client strip regex")
});
static OPERATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(query|mutation|subscription)\s+(\w+)").expect("valid operation regex")
});
static EMPTY_ROOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^{]*\{\s*\}\s*$").expect("valid empty root regex"));

/// Parsed view of one operation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDocument {
    operation_name: Option<String>,
    client_fields: Vec<String>,
    server_text: Option<String>,
}

impl ClientDocument {
    pub fn parse(text: &str) -> Self {
        let operation_name = OPERATION_RE
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|name| name.as_str().to_string());

        let client_fields = CLIENT_FIELD_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect::<Vec<_>>();

        let stripped = CLIENT_FIELD_STRIP_RE.replace_all(text, "");
        let server_text = if EMPTY_ROOT_RE.is_match(&stripped) {
            None
        } else {
            Some(stripped.into_owned())
        };

        Self {
            operation_name,
            client_fields,
            server_text,
        }
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Whether the document selects `field` with the `@client` directive.
    pub fn requests_client_field(&self, field: &str) -> bool {
        self.client_fields.iter().any(|name| name == field)
    }

    /// Text to send to the server, `None` for fully client-resolved operations.
    pub fn server_text(&self) -> Option<&str> {
        self.server_text.as_deref()
    }

    pub fn is_client_only(&self) -> bool {
        self.server_text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientDocument, ADD_RECIPE, GET_RECIPES, UPDATE_RECIPE_STARRED};

    #[test]
    fn list_document_strips_starred_field_for_server() {
        let doc = ClientDocument::parse(GET_RECIPES);

        assert_eq!(doc.operation_name(), Some("recipes"));
        assert!(doc.requests_client_field("isStarred"));
        let server = doc.server_text().expect("list query reaches the server");
        assert!(!server.contains("isStarred"));
        assert!(!server.contains("@client"));
        assert!(server.contains("title"));
    }

    #[test]
    fn starred_mutation_is_client_only() {
        let doc = ClientDocument::parse(UPDATE_RECIPE_STARRED);
        assert_eq!(doc.operation_name(), Some("updateRecipeStarred"));
        assert!(doc.requests_client_field("updateRecipeStarred"));
        assert!(doc.is_client_only());
    }

    #[test]
    fn server_document_is_left_untouched() {
        let doc = ClientDocument::parse(ADD_RECIPE);
        assert_eq!(doc.operation_name(), Some("addRecipe"));
        assert!(!doc.requests_client_field("isStarred"));
        assert_eq!(doc.server_text(), Some(ADD_RECIPE));
    }
}
