use pretty_assertions::assert_eq;
use quire_navigation::{NavigationConfig, NavigationError, NavigationUrls, encode_path, side_panel_key};

fn admin() -> NavigationUrls {
    NavigationUrls::new(&NavigationConfig {
        base_path: "/admin/".to_string(),
        base_collection_path: "c".to_string(),
    })
}

// ── Base paths ───────────────────────────────────────────────────

#[test]
fn root_mounted_urls() {
    let urls = NavigationUrls::default();
    assert_eq!(urls.home_url(), "/");
    assert_eq!(urls.full_collection_path(), "/c");
    assert_eq!(urls.build_url_collection_path("products"), "/c/products");
    assert_eq!(urls.build_cms_url_path("dashboard"), "/dashboard");
}

#[test]
fn base_mounted_urls() {
    let urls = admin();
    assert_eq!(urls.home_url(), "/admin");
    assert_eq!(urls.full_collection_path(), "/admin/c");
    assert_eq!(urls.build_url_collection_path("/products/123/"), "/admin/c/products/123");
    assert_eq!(urls.build_cms_url_path("dashboard"), "/admin/dashboard");
    assert_eq!(urls.build_url_edit_collection_path("products"), "/admin/s/edit/products");
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn collection_url_detection() {
    let urls = admin();
    assert!(urls.is_url_collection_path("/admin/c/products"));
    assert!(urls.is_url_collection_path("/admin/c/products/123/"));
    assert!(!urls.is_url_collection_path("/admin/cats"));
    assert!(!urls.is_url_collection_path("/admin/dashboard"));
}

#[test]
fn url_to_data_path() {
    let urls = admin();
    assert_eq!(urls.url_path_to_data_path("/admin/c/products/123/").unwrap(), "products/123");
    assert_eq!(urls.url_path_to_data_path("/admin/c/my%20things").unwrap(), "my things");
    assert_eq!(
        urls.url_path_to_data_path("/admin/cats"),
        Err(NavigationError::PathPrefixMismatch {
            path: "/admin/cats".to_string(),
            expected: "/admin/c".to_string(),
        })
    );
}

// ── Encoding & keys ──────────────────────────────────────────────

#[test]
fn encoding_keeps_slashes_and_hashes() {
    assert_eq!(encode_path("/products/new item#new/"), "products/new%20item#new");
    assert_eq!(encode_path("a?b=c"), "a%3Fb%3Dc");
    assert_eq!(encode_path("it's (new)!*"), "it's%20(new)!*");
    assert_eq!(encode_path("a%2Fb"), "a%252Fb");
}

#[test]
fn side_panel_keys() {
    assert_eq!(side_panel_key("/products/", None), "products");
    assert_eq!(side_panel_key("products", Some("/123/")), "products/123");
}
