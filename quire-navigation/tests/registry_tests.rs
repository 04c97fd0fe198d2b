use pretty_assertions::assert_eq;
use quire_model::CollectionDefinition;
use quire_navigation::{
    NavigationError, get_by_path_or_alias, get_collection_by_path_or_alias, resolve_aliases,
};

fn registry() -> Vec<CollectionDefinition> {
    vec![
        CollectionDefinition::new("products", "Products")
            .with_alias("p")
            .with_subcollection(CollectionDefinition::new("reviews", "Reviews").with_alias("r")),
        CollectionDefinition::new("users", "Users"),
    ]
}

// ── Single level ─────────────────────────────────────────────────

#[test]
fn lookup_by_path_or_alias() {
    let collections = registry();
    assert_eq!(get_by_path_or_alias("products", &collections).map(|c| c.name.as_str()), Some("Products"));
    assert_eq!(get_by_path_or_alias("p", &collections).map(|c| c.name.as_str()), Some("Products"));
    assert!(get_by_path_or_alias("prod", &collections).is_none());
    // Nested collections are not visible at the root.
    assert!(get_by_path_or_alias("reviews", &collections).is_none());
}

// ── Any depth ────────────────────────────────────────────────────

#[test]
fn nested_lookup() {
    let collections = registry();
    let reviews = get_collection_by_path_or_alias("/p/42/r/", &collections).unwrap();
    assert_eq!(reviews.map(|c| c.path.as_str()), Some("reviews"));
    assert!(get_collection_by_path_or_alias("products/42/missing", &collections)
        .unwrap()
        .is_none());
    assert!(get_collection_by_path_or_alias("", &collections).unwrap().is_none());
}

#[test]
fn nested_lookup_rejects_entity_paths() {
    let collections = registry();
    assert_eq!(
        get_collection_by_path_or_alias("products/42", &collections),
        Err(NavigationError::EvenSegmentCount("products/42".to_string()))
    );
}

// ── Alias resolution ─────────────────────────────────────────────

#[test]
fn aliases_become_paths() {
    let collections = registry();
    assert_eq!(resolve_aliases("p", &collections).unwrap(), "products");
    assert_eq!(resolve_aliases("/p/42/r/7", &collections).unwrap(), "products/42/reviews/7");
    assert_eq!(resolve_aliases("users/u1", &collections).unwrap(), "users/u1");
}

#[test]
fn unknown_collection_fails_fast() {
    let collections = registry();
    assert_eq!(
        resolve_aliases("missing", &collections),
        Err(NavigationError::CollectionNotFound {
            path: "missing".to_string(),
            segment: "missing".to_string(),
        })
    );
    assert!(matches!(
        resolve_aliases("p/42/unknown", &collections),
        Err(NavigationError::CollectionNotFound { segment, .. }) if segment == "unknown"
    ));
}
