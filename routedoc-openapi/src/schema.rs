use serde_json::{json, Map, Value};

/// Recursively rewrite `$ref` paths from schemars format to OpenAPI components format.
///
/// schemars 1.x generates JSON Schema Draft 2020-12 using `$defs` and
/// `$ref: "#/$defs/X"`. OpenAPI expects schemas under `#/components/schemas/X`.
pub fn sanitize_schema(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_str)) = obj.get_mut("$ref") {
                if ref_str.starts_with("#/$defs/") {
                    *ref_str = ref_str.replace("#/$defs/", "#/components/schemas/");
                }
            }

            for (_, v) in obj.iter_mut() {
                sanitize_schema(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                sanitize_schema(v);
            }
        }
        _ => {}
    }
}

/// Keywords whose value is a map of names to subschemas.
const SCHEMA_MAP_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "$defs",
    "definitions",
    "dependentSchemas",
];

/// Keywords whose value is a subschema, or a list of them for `items`.
const SCHEMA_KEYWORDS: &[&str] = &[
    "items",
    "additionalProperties",
    "additionalItems",
    "unevaluatedProperties",
    "unevaluatedItems",
    "contains",
    "propertyNames",
    "not",
    "if",
    "then",
    "else",
];

/// Keywords whose value is a list of subschemas.
const SCHEMA_LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "prefixItems"];

/// Rewrite a Draft 2020-12 schema into the OpenAPI 3.0 dialect.
///
/// Handles the constructs schemars emits that 3.0 lacks: `type` arrays
/// containing `"null"`, `anyOf` with a `{"type": "null"}` branch, `const`
/// and array-valued `examples`. Only schema positions are rewritten; property
/// names and literal values (`enum`, `default`, ...) are left alone.
pub fn downgrade_to_3_0(value: &mut Value) {
    let Value::Object(obj) = value else {
        return;
    };

    for keyword in SCHEMA_MAP_KEYWORDS {
        if let Some(Value::Object(map)) = obj.get_mut(*keyword) {
            for (_, subschema) in map.iter_mut() {
                downgrade_to_3_0(subschema);
            }
        }
    }
    for keyword in SCHEMA_KEYWORDS {
        match obj.get_mut(*keyword) {
            Some(Value::Array(list)) => list.iter_mut().for_each(downgrade_to_3_0),
            Some(subschema) => downgrade_to_3_0(subschema),
            None => {}
        }
    }
    for keyword in SCHEMA_LIST_KEYWORDS {
        if let Some(Value::Array(list)) = obj.get_mut(*keyword) {
            list.iter_mut().for_each(downgrade_to_3_0);
        }
    }

    if let Some(Value::Array(types)) = obj.get("type") {
        let mut types = types.clone();
        let nullable = types.iter().any(|t| t == "null");
        types.retain(|t| t != "null");
        if nullable {
            obj.insert("nullable".into(), json!(true));
        }
        match types.len() {
            0 => {
                obj.remove("type");
            }
            1 => {
                obj.insert("type".into(), types.remove(0));
            }
            _ => {
                obj.remove("type");
                let branches: Vec<Value> =
                    types.into_iter().map(|t| json!({ "type": t })).collect();
                obj.insert("anyOf".into(), Value::Array(branches));
            }
        }
    }

    for key in ["anyOf", "oneOf"] {
        let Some(Value::Array(branches)) = obj.get_mut(key) else {
            continue;
        };
        let before = branches.len();
        branches.retain(|b| b != &json!({ "type": "null" }) && b != &json!({ "nullable": true }));
        if branches.len() == before {
            continue;
        }
        obj.insert("nullable".into(), json!(true));
        if let Some(Value::Array(branches)) = obj.get(key) {
            if branches.len() == 1 {
                let only = branches[0].clone();
                obj.remove(key);
                match only {
                    Value::Object(inner) if inner.contains_key("$ref") => {
                        obj.insert("allOf".into(), json!([inner]));
                    }
                    Value::Object(inner) => {
                        for (k, v) in inner {
                            obj.entry(k).or_insert(v);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    if let Some(constant) = obj.remove("const") {
        obj.insert("enum".into(), json!([constant]));
    }
    if let Some(Value::Array(mut examples)) = obj.remove("examples") {
        if !examples.is_empty() {
            obj.insert("example".into(), examples.remove(0));
        }
    }
}

/// Registry that collects JSON Schema definitions for OpenAPI components.
///
/// Inline schemas pass through [`normalize`](Self::normalize), which strips
/// the `$schema` marker, promotes `$defs` to components and rewrites
/// references. The collected map becomes `components/schemas`.
pub struct SchemaRegistry {
    schemas: Map<String, Value>,
    legacy: bool,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: Map::new(),
            legacy: false,
        }
    }

    /// A registry that emits OpenAPI 3.0 schemas.
    pub fn legacy() -> Self {
        Self {
            schemas: Map::new(),
            legacy: true,
        }
    }

    /// Register a schema definition under the given name, replacing any previous one.
    pub fn register(&mut self, name: &str, schema: Value) {
        let schema = self.normalize(&schema);
        self.schemas.insert(name.to_string(), schema);
    }

    /// Prepare an inline schema for embedding in the document.
    pub fn normalize(&mut self, schema: &Value) -> Value {
        let mut schema = schema.clone();
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
            if let Some(Value::Object(defs)) = obj.remove("$defs") {
                for (def_name, def_schema) in defs {
                    if !self.schemas.contains_key(&def_name) {
                        let def_schema = self.normalize(&def_schema);
                        self.schemas.insert(def_name, def_schema);
                    }
                }
            }
        }
        sanitize_schema(&mut schema);
        if self.legacy {
            downgrade_to_3_0(&mut schema);
        }
        schema
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Consume the registry and return the schemas map for embedding
    /// in the OpenAPI spec.
    pub fn into_schemas(self) -> Map<String, Value> {
        self.schemas
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
