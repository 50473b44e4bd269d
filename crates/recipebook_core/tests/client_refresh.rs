use recipebook_core::{
    ClientError, FetchPolicy, InMemoryRecipeServer, MemoryStorage, NewRecipe, Recipe,
    RecipeClient, RecipeId, RequestKind, RequestState, StorageError, TransportError,
    REFETCH_PARTITIONS, STARRED_STORAGE_KEY,
};
use serde_json::Value;

fn seeded_server() -> InMemoryRecipeServer {
    InMemoryRecipeServer::with_recipes([
        Recipe {
            id: RecipeId::from("r1"),
            title: "Beef stew".to_string(),
            vegetarian: false,
        },
        Recipe {
            id: RecipeId::from("r2"),
            title: "Lentil soup".to_string(),
            vegetarian: true,
        },
    ])
}

fn list_flags(server: &InMemoryRecipeServer) -> Vec<Option<bool>> {
    server
        .requests()
        .iter()
        .filter(|request| request.operation_name.as_deref() == Some("recipes"))
        .map(|request| request.variables.get("vegetarian").and_then(Value::as_bool))
        .collect()
}

#[test]
fn list_views_carry_local_starred_field() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    let meat = client.recipes(false).unwrap();
    assert_eq!(meat.len(), 1);
    assert_eq!(meat[0].title, "Beef stew");
    assert_eq!(meat[0].is_starred, Some(false));
}

#[test]
fn server_never_receives_client_fields() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    client.recipes(true).unwrap();
    client
        .update_recipe_starred(&RecipeId::from("r2"), true)
        .unwrap();

    let requests = server.requests();
    assert!(!requests.is_empty());
    for request in requests {
        assert!(!request.query.contains("@client"));
        assert!(!request.query.contains("isStarred"));
    }
}

#[test]
fn cache_first_reads_skip_the_network() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    client.recipes(true).unwrap();
    client.recipes(true).unwrap();
    assert_eq!(list_flags(&server), vec![Some(true)]);

    client.query_recipes(true, FetchPolicy::NetworkOnly).unwrap();
    assert_eq!(list_flags(&server), vec![Some(true), Some(true)]);
}

#[test]
fn starred_field_is_recomputed_on_cached_reads() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    client.recipes(true).unwrap();

    recipebook_core::starred::update_recipe_starred(client.starred(), &RecipeId::from("r2"), true)
        .unwrap();

    let veg = client.recipes(true).unwrap();
    assert_eq!(veg[0].is_starred, Some(true));
}

#[test]
fn vegetarian_recipe_lands_only_in_vegetarian_list() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    client.recipes(true).unwrap();
    client.recipes(false).unwrap();

    let outcome = client
        .add_recipe(&NewRecipe::new("Chickpea curry", true))
        .unwrap();
    let (created, lists) = outcome.into_result().unwrap();

    assert_eq!(created.title, "Chickpea curry");
    assert!(lists.partition(true).iter().any(|view| view.id == created.id));
    assert!(!lists.partition(false).iter().any(|view| view.id == created.id));

    let veg = client.recipes(true).unwrap();
    let meat = client.recipes(false).unwrap();
    assert!(veg.iter().any(|view| view.title == "Chickpea curry"));
    assert!(meat.iter().all(|view| view.title != "Chickpea curry"));
}

#[test]
fn every_mutation_refetches_both_partitions_in_order() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    client.add_recipe(&NewRecipe::new("Omelette", true)).unwrap();
    let expected = REFETCH_PARTITIONS.iter().copied().map(Some).collect::<Vec<_>>();
    assert_eq!(list_flags(&server), expected);
    let operations = server
        .requests()
        .into_iter()
        .filter_map(|request| request.operation_name)
        .collect::<Vec<_>>();
    assert_eq!(operations, vec!["addRecipe", "recipes", "recipes"]);

    server.clear_requests();
    client
        .update_recipe_starred(&RecipeId::from("r1"), true)
        .unwrap();
    assert_eq!(list_flags(&server), expected);
}

#[test]
fn starred_mutation_is_resolved_locally() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    let outcome = client
        .update_recipe_starred(&RecipeId::from("r1"), true)
        .unwrap();

    assert_eq!(outcome.data.typename, "Recipe");
    assert!(outcome.data.is_starred);
    assert!(server
        .requests()
        .iter()
        .all(|request| request.operation_name.as_deref() == Some("recipes")));

    let lists = outcome.refetch.unwrap();
    assert_eq!(lists.partition(false)[0].is_starred, Some(true));
    assert_eq!(lists.partition(true)[0].is_starred, Some(false));
}

#[test]
fn refetch_failure_keeps_local_star() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    server.fail_operation("recipes", 1);

    let outcome = client
        .update_recipe_starred(&RecipeId::from("r2"), true)
        .unwrap();

    assert!(outcome.data.is_starred);
    match outcome.refetch {
        Err(ClientError::Refetch {
            vegetarian: true,
            source: TransportError::Unavailable(_),
        }) => {}
        other => panic!("unexpected refetch result: {other:?}"),
    }
    assert!(client.starred().contains(&RecipeId::from("r2")));
    // the second partition is still attempted
    assert_eq!(list_flags(&server), vec![Some(true), Some(false)]);
    assert!(client.cache().has_list(false));
}

#[test]
fn refetch_failure_keeps_server_side_add() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    server.fail_operation("recipes", 2);

    let mut state = RequestState::Pending;
    state.settle_mutation(client.add_recipe(&NewRecipe::new("Pesto pasta", true)));

    assert!(matches!(state, RequestState::RefetchFailed { .. }));
    assert_eq!(state.data().map(|record| record.title.as_str()), Some("Pesto pasta"));
    assert!(state
        .placeholder(RequestKind::Mutation)
        .unwrap()
        .starts_with("Error : "));
    assert_eq!(server.recipes().len(), 3);
}

#[test]
fn failed_add_does_not_refetch() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    server.fail_operation("addRecipe", 1);

    let mut state = RequestState::Pending;
    state.settle_mutation(client.add_recipe(&NewRecipe::new("Risotto", true)));

    assert!(matches!(state, RequestState::Failed(_)));
    assert!(state
        .placeholder(RequestKind::Mutation)
        .unwrap()
        .starts_with("Submission error! server unavailable"));
    assert!(list_flags(&server).is_empty());
}

#[test]
fn blank_title_is_rejected_before_the_network() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);

    let err = client.add_recipe(&NewRecipe::new("   ", false)).unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[test]
fn storage_write_failure_propagates_without_refetch() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    storage.reject_writes(true);
    let mut client = RecipeClient::new(&server, &storage);

    let err = client
        .update_recipe_starred(&RecipeId::from("r1"), true)
        .unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)));
    assert!(server.requests().is_empty());
}

#[test]
fn storage_read_failure_keeps_existing_stars() {
    let server = seeded_server();
    let storage = MemoryStorage::with_item(STARRED_STORAGE_KEY, r#"["a","b"]"#);
    storage.fail_reads(true);
    let mut client = RecipeClient::new(&server, &storage);

    let err = client
        .update_recipe_starred(&RecipeId::from("c"), true)
        .unwrap_err();
    assert!(matches!(err, ClientError::Storage(StorageError::ReadFailed { .. })));
    assert!(server.requests().is_empty());

    storage.fail_reads(false);
    assert_eq!(storage.raw(STARRED_STORAGE_KEY).as_deref(), Some(r#"["a","b"]"#));
}

#[test]
fn list_query_failure_is_surfaced() {
    let server = seeded_server();
    let storage = MemoryStorage::new();
    let mut client = RecipeClient::new(&server, &storage);
    server.fail_operation("recipes", 1);

    let mut state = RequestState::Pending;
    state.settle_query(client.recipes(false));

    assert!(state
        .placeholder(RequestKind::Query)
        .unwrap()
        .starts_with("Error : server unavailable"));
    assert!(!client.cache().has_list(false));
}
