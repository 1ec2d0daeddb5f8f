use routedoc_openapi::schema::{downgrade_to_3_0, sanitize_schema, SchemaRegistry};
use serde_json::json;

// ── SchemaRegistry ──────────────────────────────────────────────────────────

#[test]
fn registry_new_empty() {
    let registry = SchemaRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.into_schemas().is_empty());
}

#[test]
fn register_single_schema() {
    let mut registry = SchemaRegistry::new();
    registry.register("Pet", json!({"type": "object"}));

    assert_eq!(registry.len(), 1);
    let schemas = registry.into_schemas();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas["Pet"], json!({"type": "object"}));
}

#[test]
fn register_duplicate_overwrites() {
    let mut registry = SchemaRegistry::new();
    registry.register("Pet", json!({"type": "object", "description": "v1"}));
    registry.register("Pet", json!({"type": "object", "description": "v2"}));

    let schemas = registry.into_schemas();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas["Pet"]["description"], "v2");
}

#[test]
fn default_creates_empty_registry() {
    let registry = SchemaRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

// ── normalize ───────────────────────────────────────────────────────────────

#[test]
fn normalize_strips_schema_marker() {
    let mut registry = SchemaRegistry::new();
    let out = registry.normalize(&json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "string"
    }));
    assert_eq!(out, json!({"type": "string"}));
}

#[test]
fn normalize_promotes_defs() {
    let mut registry = SchemaRegistry::new();
    let out = registry.normalize(&json!({
        "type": "object",
        "properties": { "kind": { "$ref": "#/$defs/Kind" } },
        "$defs": { "Kind": { "type": "string", "enum": ["dog", "cat"] } }
    }));

    assert!(out.get("$defs").is_none());
    assert_eq!(out["properties"]["kind"]["$ref"], "#/components/schemas/Kind");
    let schemas = registry.into_schemas();
    assert!(schemas.contains_key("Kind"));
    assert_eq!(schemas["Kind"]["enum"], json!(["dog", "cat"]));
}

#[test]
fn first_promoted_definition_wins() {
    let mut registry = SchemaRegistry::new();
    registry.normalize(&json!({ "$defs": { "Kind": { "description": "first" } } }));
    registry.normalize(&json!({ "$defs": { "Kind": { "description": "second" } } }));
    assert_eq!(registry.into_schemas()["Kind"]["description"], "first");
}

#[test]
fn nested_defs_refs_rewritten() {
    let mut registry = SchemaRegistry::new();
    registry.normalize(&json!({
        "$defs": {
            "Owner": { "type": "object", "properties": { "pet": { "$ref": "#/$defs/Pet" } } },
            "Pet": { "type": "object" }
        }
    }));
    let schemas = registry.into_schemas();
    assert_eq!(schemas["Owner"]["properties"]["pet"]["$ref"], "#/components/schemas/Pet");
}

#[test]
fn sanitize_rewrites_inside_arrays() {
    let mut schema = json!({ "anyOf": [ { "$ref": "#/$defs/A" }, { "$ref": "#/$defs/B" } ] });
    sanitize_schema(&mut schema);
    assert_eq!(schema["anyOf"][0]["$ref"], "#/components/schemas/A");
    assert_eq!(schema["anyOf"][1]["$ref"], "#/components/schemas/B");
}

#[test]
fn sanitize_leaves_foreign_refs() {
    let mut schema = json!({ "$ref": "https://example.com/schema.json" });
    sanitize_schema(&mut schema);
    assert_eq!(schema["$ref"], "https://example.com/schema.json");
}

// ── OpenAPI 3.0 dialect ─────────────────────────────────────────────────────

#[test]
fn nullable_type_array() {
    let mut schema = json!({ "type": ["integer", "null"], "format": "uint32" });
    downgrade_to_3_0(&mut schema);
    assert_eq!(schema, json!({ "type": "integer", "format": "uint32", "nullable": true }));
}

#[test]
fn nullable_ref_wrapped_in_all_of() {
    let mut schema = json!({ "anyOf": [ { "$ref": "#/components/schemas/Pet" }, { "type": "null" } ] });
    downgrade_to_3_0(&mut schema);
    assert_eq!(
        schema,
        json!({ "allOf": [ { "$ref": "#/components/schemas/Pet" } ], "nullable": true })
    );
}

#[test]
fn const_becomes_enum_and_examples_collapse() {
    let mut schema = json!({ "const": "dog", "examples": ["dog", "cat"] });
    downgrade_to_3_0(&mut schema);
    assert_eq!(schema, json!({ "enum": ["dog"], "example": "dog" }));
}

#[test]
fn legacy_registry_downgrades_definitions() {
    let mut registry = SchemaRegistry::legacy();
    let out = registry.normalize(&json!({
        "type": ["string", "null"],
        "$defs": { "Age": { "type": ["integer", "null"] } }
    }));
    assert_eq!(out["nullable"], true);
    assert_eq!(registry.into_schemas()["Age"]["type"], "integer");
}

#[test]
fn property_names_matching_keywords_survive() {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "examples": { "type": "array", "items": { "type": "string" } },
            "const": { "type": "integer" },
            "type": { "type": ["string", "null"] },
            "anyOf": { "type": "boolean" }
        },
        "required": ["const"]
    });
    downgrade_to_3_0(&mut schema);

    let props = &schema["properties"];
    assert_eq!(props["examples"], json!({ "type": "array", "items": { "type": "string" } }));
    assert_eq!(props["const"], json!({ "type": "integer" }));
    assert_eq!(props["type"], json!({ "type": "string", "nullable": true }));
    assert_eq!(props["anyOf"], json!({ "type": "boolean" }));
    assert!(schema.get("enum").is_none());
}

#[test]
fn literal_values_left_alone() {
    let mut schema = json!({
        "type": "object",
        "default": { "const": 1, "examples": [2] },
        "enum": [{ "type": ["a", "null"] }],
        "items": { "const": "x" }
    });
    downgrade_to_3_0(&mut schema);

    assert_eq!(schema["default"], json!({ "const": 1, "examples": [2] }));
    assert_eq!(schema["enum"], json!([{ "type": ["a", "null"] }]));
    assert_eq!(schema["items"], json!({ "enum": ["x"] }));
}
