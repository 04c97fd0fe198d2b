use pretty_assertions::assert_eq;
use quire_datasource::{
    AuthController, DataSourceError, FileUpload, MemoryStorageSource, MemoryUserConfigPersistence,
    StaticAuthController, StorageSource, check_upload,
};
use quire_model::{CollectionOverride, PropertyOverride, StorageConfig, User, UserConfigurationPersistence};

fn upload(name: &str, content_type: Option<&str>, size: usize) -> FileUpload {
    FileUpload {
        file_name: name.into(),
        path: "images/".into(),
        bytes: vec![0; size],
        content_type: content_type.map(str::to_string),
    }
}

fn config(accepted: &[&str], max_size: Option<u64>) -> StorageConfig {
    StorageConfig {
        storage_path: "images".into(),
        accepted_files: accepted.iter().map(|s| s.to_string()).collect(),
        max_size,
        store_url: false,
    }
}

// ── Storage ──────────────────────────────────────────────────────

#[tokio::test]
async fn upload_then_resolve_then_delete() {
    let storage = MemoryStorageSource::new("memory://bucket/");
    let uploaded = storage.upload_file(upload("cat.png", Some("image/png"), 4)).await.unwrap();
    assert_eq!(uploaded.path, "images/cat.png");
    assert_eq!(uploaded.download_url, "memory://bucket/images/cat.png");

    let download = storage.get_download_url("images/cat.png").await.unwrap();
    assert!(!download.file_not_found);
    assert_eq!(download.metadata.unwrap().size, 4);

    storage.delete_file("images/cat.png").await.unwrap();
    assert!(storage.get_download_url("images/cat.png").await.unwrap().file_not_found);
}

#[test]
fn upload_checks() {
    assert!(check_upload(&config(&["image/*"], None), &upload("a.png", Some("image/png"), 1)).is_ok());
    assert!(check_upload(&config(&[".pdf"], None), &upload("doc.PDF", None, 1)).is_ok());
    assert!(matches!(
        check_upload(&config(&["image/*"], None), &upload("a.txt", Some("text/plain"), 1)),
        Err(DataSourceError::UnacceptedFile { .. })
    ));
    assert!(matches!(
        check_upload(&config(&[], Some(10)), &upload("a.bin", None, 11)),
        Err(DataSourceError::FileTooLarge { size: 11, max: 10 })
    ));
}

// ── Auth ─────────────────────────────────────────────────────────

#[tokio::test]
async fn static_auth_sign_in_and_out() {
    let auth = StaticAuthController::new(None);
    assert!(auth.user().is_none());
    assert!(!auth.initial_loading());
    auth.sign_in(User::new("u1"));
    assert_eq!(auth.user().map(|u| u.uid), Some("u1".to_string()));
    auth.sign_out().await.unwrap();
    assert!(auth.user().is_none());
}

// ── User configuration ───────────────────────────────────────────

#[test]
fn user_config_modifications_merge() {
    let persistence = MemoryUserConfigPersistence::new();
    assert!(persistence.get_collection_config("products").is_none());

    persistence.on_collection_modified(
        "/products/",
        CollectionOverride::default().with_property("x", PropertyOverride::column_width(50)),
    );
    persistence.on_collection_modified(
        "products",
        CollectionOverride::default().with_property(
            "x",
            PropertyOverride {
                hide_from_collection: Some(true),
                ..Default::default()
            },
        ),
    );

    let stored = persistence.get_collection_config("products").unwrap();
    assert_eq!(stored.properties["x"].column_width, Some(50));
    assert_eq!(stored.properties["x"].hide_from_collection, Some(true));
}

#[test]
fn user_config_json_round_trip() {
    let persistence = MemoryUserConfigPersistence::new();
    persistence.on_collection_modified("products", CollectionOverride::named("Goods"));
    let restored = MemoryUserConfigPersistence::from_json(&persistence.to_json().unwrap()).unwrap();
    assert_eq!(
        restored.get_collection_config("products").and_then(|o| o.name),
        Some("Goods".to_string())
    );
}
