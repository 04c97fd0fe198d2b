//! Path utility laws.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quire_navigation::{normalize, path_combinations, split_segments};

// ── normalize ────────────────────────────────────────────────────

#[test]
fn normalize_strips_one_slash_each_side() {
    assert_eq!(normalize("/a/b/"), "a/b");
    assert_eq!(normalize("a/b"), "a/b");
    assert_eq!(normalize("/"), "");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("//a//"), "/a/");
}

/// Only one slash comes off each edge, so doubled edge slashes survive one
/// pass and `normalize` is idempotent only on paths without them.
#[test]
fn normalize_keeps_inner_slash_of_doubled_edges() {
    assert_eq!(normalize("//a//"), "/a/");
    assert_eq!(normalize(normalize("//a//")), "a");
    assert_ne!(normalize(normalize("//a//")), normalize("//a//"));
}

#[test]
fn split_segments_of_empty_path_is_empty() {
    assert!(split_segments("").is_empty());
    assert!(split_segments("/").is_empty());
    assert_eq!(split_segments("/products/123/"), vec!["products", "123"]);
}

// ── path_combinations ────────────────────────────────────────────

#[test]
fn combinations_of_odd_path() {
    assert_eq!(path_combinations(&["a", "b", "c"]), vec!["a/b/c", "a"]);
}

#[test]
fn combinations_drop_dangling_entity_id() {
    assert_eq!(path_combinations(&["a", "b", "c", "d"]), vec!["a/b/c", "a"]);
    assert_eq!(path_combinations(&["a", "b"]), vec!["a"]);
}

#[test]
fn combinations_of_nothing() {
    let empty: [&str; 0] = [];
    assert!(path_combinations(&empty).is_empty());
    assert_eq!(path_combinations(&["a"]), vec!["a"]);
}

fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,8}").unwrap()
}

fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(segment_strategy(), 0..8),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(segments, leading, trailing)| {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            path
        })
}

proptest! {
    // `path_strategy` adds at most one slash per edge.
    #[test]
    fn normalize_is_idempotent(path in path_strategy()) {
        prop_assert_eq!(normalize(normalize(&path)), normalize(&path));
    }

    #[test]
    fn normalized_paths_have_no_edge_slashes(path in path_strategy()) {
        let normalized = normalize(&path);
        prop_assert!(!normalized.starts_with('/'));
        prop_assert!(!normalized.ends_with('/'));
    }

    #[test]
    fn combinations_have_odd_length(segments in prop::collection::vec(segment_strategy(), 0..12)) {
        let combinations = path_combinations(&segments);
        for combination in &combinations {
            prop_assert_eq!(combination.split('/').count() % 2, 1);
            prop_assert!(segments.join("/").starts_with(combination.as_str()));
        }
        prop_assert_eq!(combinations.len(), segments.len().div_ceil(2));
    }
}
