use clap::Parser;
use pretty_assertions::assert_eq;
use quire_cli::{Args, load_config, run};
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

fn cms_config() -> Value {
    json!({
        "navigation": { "basePath": "/admin", "baseCollectionPath": "c" },
        "collections": [
            {
                "path": "products",
                "alias": "p",
                "name": "Products",
                "group": "Shop",
                "properties": {
                    "title": { "dataType": "string", "name": "Title" },
                    "status": { "dataType": "string", "enumValues": { "draft": "Draft", "live": "Live" } },
                    "tags": { "dataType": "array" }
                },
                "subcollections": [
                    { "path": "reviews", "name": "Reviews" }
                ],
                "views": [
                    { "path": "preview", "name": "Preview" }
                ]
            }
        ],
        "views": [
            { "path": ["stats", "statistics"], "name": "Stats", "group": "Reports" },
            { "path": "secret", "name": "Secret", "hideFromNavigation": true }
        ]
    })
}

fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

async fn run_with(config: &NamedTempFile, extra: &[&str]) -> anyhow::Result<String> {
    let config_path = config.path().to_str().unwrap().to_string();
    let mut argv = vec!["quire".to_string(), "--config".to_string(), config_path];
    argv.extend(extra.iter().map(|s| s.to_string()));
    let args = Args::try_parse_from(argv).unwrap();
    run(&args).await
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn loads_config_file() {
    let file = write_json(&cms_config());
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.navigation.base_path, "/admin");
    assert_eq!(config.collections[0].subcollections[0].path, "reviews");
    assert_eq!(config.views[0].path, vec!["stats".to_string(), "statistics".to_string()]);
}

#[test]
fn missing_config_reports_path() {
    let err = load_config(std::path::Path::new("/nonexistent/cms.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/cms.json"));
}

// ── Commands ─────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_command() {
    let file = write_json(&cms_config());
    let output = run_with(&file, &["resolve", "p/1/reviews/2"]).await.unwrap();
    let entries: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        entries,
        json!([
            { "type": "collection", "path": "p", "name": "Products" },
            { "type": "entity", "path": "p/1", "entityId": "1" },
            { "type": "collection", "path": "p/1/reviews", "name": "Reviews" },
            { "type": "entity", "path": "p/1/reviews/2", "entityId": "2" }
        ])
    );
}

#[tokio::test]
async fn aliases_command() {
    let file = write_json(&cms_config());
    assert_eq!(run_with(&file, &["aliases", "p/1/reviews"]).await.unwrap(), "products/1/reviews");
    assert!(run_with(&file, &["aliases", "orders"]).await.is_err());
}

#[tokio::test]
async fn top_nav_command() {
    let file = write_json(&cms_config());
    let output: Value = serde_json::from_str(&run_with(&file, &["top-nav"]).await.unwrap()).unwrap();
    let urls: Vec<&str> = output["navigationEntries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["/admin/c/p", "/admin/stats"]);
    assert_eq!(output["groups"], json!(["Shop", "Reports"]));
}

#[tokio::test]
async fn collection_command_applies_user_config() {
    let file = write_json(&cms_config());
    let user = write_json(&json!({
        "products": { "name": "My products", "properties": { "title": { "columnWidth": 420 } } }
    }));
    let user_path = user.path().to_str().unwrap().to_string();

    let plain: Value = serde_json::from_str(&run_with(&file, &["collection", "products"]).await.unwrap()).unwrap();
    assert_eq!(plain["name"], "Products");

    let output = run_with(&file, &["--user-config", &user_path, "collection", "products"]).await.unwrap();
    let overridden: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(overridden["name"], "My products");
    assert_eq!(overridden["properties"]["title"]["columnWidth"], 420);

    assert!(run_with(&file, &["collection", "orders"]).await.is_err());
}

#[tokio::test]
async fn fields_command_isolates_broken_properties() {
    let file = write_json(&cms_config());
    let output: Value = serde_json::from_str(&run_with(&file, &["fields", "products"]).await.unwrap()).unwrap();
    let fields = output.as_array().unwrap();
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0]["binding"], json!({ "widget": "text", "multiline": false }));
    assert_eq!(fields[0]["columnWidth"], 200);
    assert_eq!(fields[1]["binding"]["widget"], "select");
    assert!(fields[2].get("binding").is_none());
    assert!(fields[2]["error"].as_str().unwrap().contains("tags"));
}
