use pretty_assertions::assert_eq;
use quire_datasource::{
    DataSource, DataSourceError, MemoryDataSource, SaveEntityRequest, check_unique_fields,
    delete_entity_with_callbacks, fetch_entity_with_callbacks, save_entity_with_callbacks,
};
use quire_model::{
    Callbacks, CollectionDefinition, Entity, EntityCallbacks, EntityValues, Property, PropertyValidation,
    SaveContext, resolve_collection,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct AuditCallbacks {
    log: Mutex<Vec<String>>,
}

impl AuditCallbacks {
    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl EntityCallbacks for AuditCallbacks {
    fn on_pre_save(&self, ctx: &SaveContext<'_>, mut values: EntityValues) -> Result<EntityValues, String> {
        if values.get("name").and_then(|v| v.as_str()) == Some("forbidden") {
            return Err("name not allowed".into());
        }
        values.insert("audited".into(), json!(true));
        self.log.lock().unwrap().push(format!("pre_save:{}", ctx.path));
        Ok(values)
    }

    fn on_save_success(&self, _ctx: &SaveContext<'_>, entity: &Entity) {
        self.log.lock().unwrap().push(format!("saved:{}", entity.id));
    }

    fn on_save_failure(&self, _ctx: &SaveContext<'_>, error: &str) {
        self.log.lock().unwrap().push(format!("failed:{error}"));
    }

    fn on_pre_delete(&self, entity: &Entity) -> Result<(), String> {
        if entity.get_bool("/locked") == Some(true) {
            Err("locked".into())
        } else {
            Ok(())
        }
    }

    fn on_delete(&self, entity: &Entity) {
        self.log.lock().unwrap().push(format!("deleted:{}", entity.id));
    }

    fn on_fetch(&self, mut entity: Entity) -> Entity {
        entity.values.insert("fetched".into(), json!(true));
        entity
    }
}

fn values(v: serde_json::Value) -> EntityValues {
    v.as_object().cloned().unwrap()
}

fn setup() -> (MemoryDataSource, CollectionDefinition, Arc<AuditCallbacks>) {
    let audit = Arc::new(AuditCallbacks::default());
    let collection = CollectionDefinition::new("users", "Users")
        .with_callbacks(Callbacks::from_arc(audit.clone()));
    (MemoryDataSource::new(), collection, audit)
}

// ── Save ─────────────────────────────────────────────────────────

#[tokio::test]
async fn pre_save_rewrites_values() {
    let (ds, collection, audit) = setup();
    let request = SaveEntityRequest::existing("users", "u1", values(json!({"name": "Ada"})));
    let saved = save_entity_with_callbacks(&ds, &collection, request).await.unwrap();
    assert_eq!(saved.get_bool("/audited"), Some(true));
    assert_eq!(audit.log(), vec!["pre_save:users".to_string(), "saved:u1".to_string()]);
}

#[tokio::test]
async fn pre_save_rejection_skips_the_write() {
    let (ds, collection, audit) = setup();
    let request = SaveEntityRequest::existing("users", "u1", values(json!({"name": "forbidden"})));
    let result = save_entity_with_callbacks(&ds, &collection, request).await;
    assert!(matches!(result, Err(DataSourceError::Rejected(_))));
    assert!(ds.fetch_entity("users", "u1").await.unwrap().is_none());
    assert_eq!(audit.log(), vec!["failed:name not allowed".to_string()]);
}

#[tokio::test]
async fn backend_failure_reaches_on_save_failure() {
    let (ds, collection, audit) = setup();
    ds.set_offline(Some("down"));
    let request = SaveEntityRequest::existing("users", "u1", values(json!({"name": "Ada"})));
    assert!(save_entity_with_callbacks(&ds, &collection, request).await.is_err());
    assert_eq!(
        audit.log(),
        vec!["pre_save:users".to_string(), "failed:data source unavailable: down".to_string()]
    );
}

#[tokio::test]
async fn collections_without_callbacks_save_directly() {
    let ds = MemoryDataSource::new();
    let collection = CollectionDefinition::new("users", "Users");
    let request = SaveEntityRequest::existing("users", "u1", values(json!({"name": "Ada"})));
    let saved = save_entity_with_callbacks(&ds, &collection, request).await.unwrap();
    assert_eq!(saved.get_bool("/audited"), None);
}

// ── Delete & fetch ───────────────────────────────────────────────

#[tokio::test]
async fn pre_delete_can_veto() {
    let (ds, collection, audit) = setup();
    let ds = ds.with_entities("users", [("u1", values(json!({"locked": true}))), ("u2", EntityValues::new())]);
    let locked = ds.fetch_entity("users", "u1").await.unwrap().unwrap();
    assert!(matches!(
        delete_entity_with_callbacks(&ds, &collection, &locked).await,
        Err(DataSourceError::Rejected(_))
    ));
    let free = ds.fetch_entity("users", "u2").await.unwrap().unwrap();
    delete_entity_with_callbacks(&ds, &collection, &free).await.unwrap();
    assert_eq!(audit.log(), vec!["deleted:u2".to_string()]);
}

#[tokio::test]
async fn fetch_runs_on_fetch() {
    let (ds, collection, _) = setup();
    let ds = ds.with_entities("users", [("u1", EntityValues::new())]);
    let entity = fetch_entity_with_callbacks(&ds, &collection, "users", "u1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entity.get_bool("/fetched"), Some(true));
    assert!(fetch_entity_with_callbacks(&ds, &collection, "users", "nope").await.unwrap().is_none());
}

// ── Unique fields ────────────────────────────────────────────────

#[tokio::test]
async fn unique_fields_report_conflicts() {
    let ds = MemoryDataSource::new().with_entities("users", [("u1", values(json!({"email": "a@x.io", "name": "A"})))]);
    let unique = PropertyValidation {
        required: false,
        unique: true,
    };
    let collection = CollectionDefinition::new("users", "Users")
        .with_property("email", Property::string().with_validation(unique))
        .with_property("name", Property::string());
    let resolved = resolve_collection(&collection, "users", None, &EntityValues::new());

    let clash = values(json!({"email": "a@x.io", "name": "A"}));
    assert_eq!(
        check_unique_fields(&ds, &resolved, &clash, None).await.unwrap(),
        vec!["email".to_string()]
    );
    assert!(check_unique_fields(&ds, &resolved, &clash, Some("u1")).await.unwrap().is_empty());
}
