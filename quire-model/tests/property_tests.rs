use pretty_assertions::assert_eq;
use quire_model::{
    EntityValues, EnumValueConfig, EnumValues, Property, PropertyBuilder, PropertyContext, PropertyKind,
    PropertyOrBuilder, PropertyValidation, resolve_property,
};

fn ctx(values: &EntityValues) -> PropertyContext<'_> {
    PropertyContext {
        path: "products",
        entity_id: Some("123"),
        values,
    }
}

// ── JSON config format ───────────────────────────────────────────

#[test]
fn string_property_from_json() {
    let p: Property = serde_json::from_str(
        r#"{"dataType": "string", "name": "Title", "multiline": true, "columnWidth": 320}"#,
    )
    .unwrap();
    assert_eq!(p.common.name.as_deref(), Some("Title"));
    assert_eq!(p.common.column_width, Some(320));
    match p.kind {
        PropertyKind::String(s) => {
            assert!(s.multiline);
            assert!(!s.markdown);
        }
        other => panic!("expected string, got {other:?}"),
    }
}

#[test]
fn unit_kinds_from_json() {
    let p: Property = serde_json::from_str(r#"{"dataType": "boolean", "name": "Active"}"#).unwrap();
    assert_eq!(p.kind, PropertyKind::Boolean);
    let p: Property = serde_json::from_str(r#"{"dataType": "geopoint"}"#).unwrap();
    assert_eq!(p.kind, PropertyKind::Geopoint);
}

#[test]
fn nested_array_of_map_from_json() {
    let p: Property = serde_json::from_str(
        r#"{
            "dataType": "array",
            "of": {
                "dataType": "map",
                "properties": {
                    "label": {"dataType": "string"},
                    "weight": {"dataType": "number", "min": 0}
                }
            }
        }"#,
    )
    .unwrap();
    let PropertyKind::Array(array) = &p.kind else {
        panic!("expected array");
    };
    let of = array.of.as_deref().unwrap();
    let PropertyKind::Map(map) = &of.kind else {
        panic!("expected map");
    };
    let keys: Vec<_> = map.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["label".to_string(), "weight".to_string()]);
}

#[test]
fn enum_values_accept_list_and_map() {
    let list: EnumValues = serde_json::from_str(r#"[{"id": "a", "label": "A"}]"#).unwrap();
    assert_eq!(list.to_configs(), vec![EnumValueConfig::new("a", "A")]);

    let map: EnumValues = serde_json::from_str(r#"{"es": "Spanish", "de": "German"}"#).unwrap();
    assert_eq!(
        map.to_configs(),
        vec![EnumValueConfig::new("es", "Spanish"), EnumValueConfig::new("de", "German")]
    );
}

#[test]
fn unknown_data_type_is_rejected() {
    let result: Result<Property, _> = serde_json::from_str(r#"{"dataType": "blob"}"#);
    assert!(result.is_err());
}

// ── Helpers ──────────────────────────────────────────────────────

#[test]
fn label_falls_back_to_key() {
    assert_eq!(Property::string().label("title"), "title");
    assert_eq!(Property::string().with_name("Title").label("title"), "Title");
}

#[test]
fn validation_flags() {
    let p = Property::string().with_validation(PropertyValidation {
        required: true,
        unique: false,
    });
    assert!(p.is_required());
    assert!(!p.is_unique());
    assert!(!Property::number().is_required());
}

#[test]
fn enum_values_only_attach_to_string_and_number() {
    let values = EnumValues::List(vec![EnumValueConfig::new("x", "X")]);
    assert!(Property::string().with_enum_values(values.clone()).enum_values().is_some());
    assert!(Property::number().with_enum_values(values.clone()).enum_values().is_some());
    assert!(Property::boolean().with_enum_values(values).enum_values().is_none());
}

#[test]
fn data_type_names() {
    assert_eq!(Property::date().kind.data_type(), "date");
    assert_eq!(Property::reference("users").kind.data_type(), "reference");
    assert_eq!(Property::array_of(Property::string()).kind.data_type(), "array");
}

// ── Resolution ───────────────────────────────────────────────────

#[test]
fn static_property_resolves_unchanged() {
    let values = EntityValues::new();
    let p = Property::string().with_name("Title");
    let resolved = resolve_property(&PropertyOrBuilder::Static(p.clone()), &ctx(&values));
    assert_eq!(resolved.property, p);
    assert!(!resolved.from_builder);
}

#[test]
fn builder_sees_entity_context() {
    let mut values = EntityValues::new();
    values.insert("kind".into(), serde_json::json!("digital"));
    let builder = PropertyBuilder::new(|ctx| {
        let name = match ctx.values.get("kind").and_then(|v| v.as_str()) {
            Some("digital") => "Download URL",
            _ => "Shipping weight",
        };
        Property::string().with_name(format!("{name} ({})", ctx.entity_id.unwrap_or("new")))
    });
    let resolved = resolve_property(&PropertyOrBuilder::Builder(builder), &ctx(&values));
    assert!(resolved.from_builder);
    assert_eq!(resolved.common().name.as_deref(), Some("Download URL (123)"));
}

#[test]
fn resolution_normalizes_nested_enum_maps() {
    let values = EntityValues::new();
    let mut map = indexmap::IndexMap::new();
    map.insert("s".to_string(), "Small".to_string());
    let p = Property::array_of(Property::string().with_enum_values(EnumValues::Map(map)));
    let resolved = resolve_property(&p.into(), &ctx(&values));
    let PropertyKind::Array(array) = resolved.kind() else {
        panic!("expected array");
    };
    assert_eq!(
        array.of.as_deref().unwrap().enum_values(),
        Some(&EnumValues::List(vec![EnumValueConfig::new("s", "Small")]))
    );
}

#[test]
fn builders_do_not_serialize() {
    let builder = PropertyOrBuilder::Builder(PropertyBuilder::new(|_| Property::string()));
    assert!(serde_json::to_string(&builder).is_err());
}
