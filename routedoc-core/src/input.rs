use crate::http::{Form, Json, Path, Query};
use crate::meta::{ParamDoc, ParamLocation};
use schemars::JsonSchema;
use serde_json::{json, Value};

/// The part of a request a validation schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Json,
    Form,
    Query,
    Param,
    Header,
    Cookie,
}

impl Target {
    /// Parameter location for non-body targets.
    pub fn location(self) -> Option<ParamLocation> {
        match self {
            Target::Query => Some(ParamLocation::Query),
            Target::Param => Some(ParamLocation::Path),
            Target::Header => Some(ParamLocation::Header),
            Target::Cookie => Some(ParamLocation::Cookie),
            Target::Json | Target::Form => None,
        }
    }

    /// Request body media type for body targets.
    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Target::Json => Some("application/json"),
            Target::Form => Some("application/x-www-form-urlencoded"),
            _ => None,
        }
    }
}

/// An extractor whose input can be documented.
///
/// Implemented for axum's `Json`, `Form`, `Query` and `Path` and for the
/// validated extractors in [`validation`](crate::validation).
pub trait InputSchema {
    fn target() -> Target;

    fn schema() -> Value;
}

/// The JSON Schema of `T`, as generated by schemars.
pub fn schema_for<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// Expand an object schema into one parameter per property.
///
/// Root `$defs` travel with each property schema so references stay resolvable.
pub fn params_from_schema(location: ParamLocation, schema: &Value) -> Vec<ParamDoc> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        let name = schema
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("value");
        return vec![ParamDoc::new(name, location).schema_value(schema.clone())];
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let defs = schema.get("$defs");

    properties
        .iter()
        .map(|(name, property)| {
            let needs_defs = references_defs(property);
            let mut property = property.clone();
            let description = property
                .as_object_mut()
                .and_then(|obj| obj.remove("description"))
                .and_then(|d| d.as_str().map(str::to_string));
            if let (true, Some(defs), Some(obj)) = (needs_defs, defs, property.as_object_mut()) {
                obj.insert("$defs".into(), defs.clone());
            }

            let mut param = ParamDoc::new(name, location)
                .required(location == ParamLocation::Path || required.contains(&name.as_str()))
                .schema_value(property);
            param.description = description;
            param
        })
        .collect()
}

fn references_defs(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.iter().any(|(k, v)| {
            (k == "$ref" && v.as_str().is_some_and(|r| r.starts_with("#/$defs/"))) || references_defs(v)
        }),
        Value::Array(arr) => arr.iter().any(references_defs),
        _ => false,
    }
}

macro_rules! input_schema {
    ($($extractor:ident => $target:ident),* $(,)?) => {
        $(
            impl<T: JsonSchema> InputSchema for $extractor<T> {
                fn target() -> Target {
                    Target::$target
                }

                fn schema() -> Value {
                    schema_for::<T>()
                }
            }
        )*
    };
}

input_schema! {
    Json => Json,
    Form => Form,
    Query => Query,
    Path => Param,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_targets_have_media_types() {
        assert_eq!(Target::Json.media_type(), Some("application/json"));
        assert_eq!(Target::Form.media_type(), Some("application/x-www-form-urlencoded"));
        assert!(Target::Json.location().is_none());
    }

    #[test]
    fn param_targets_have_locations() {
        assert_eq!(Target::Param.location(), Some(ParamLocation::Path));
        assert_eq!(Target::Cookie.location(), Some(ParamLocation::Cookie));
        assert!(Target::Query.media_type().is_none());
    }

    #[test]
    fn scalar_schema_becomes_single_param() {
        let params = params_from_schema(ParamLocation::Header, &json!({ "title": "x-request-id", "type": "string" }));
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "x-request-id");
        assert!(!params[0].required);
    }

    #[test]
    fn defs_follow_referencing_properties() {
        let schema = json!({
            "type": "object",
            "properties": {
                "kind": { "$ref": "#/$defs/Kind" },
                "page": { "type": "integer" }
            },
            "$defs": { "Kind": { "type": "string", "enum": ["a", "b"] } }
        });
        let params = params_from_schema(ParamLocation::Query, &schema);
        let kind = params.iter().find(|p| p.name == "kind").unwrap();
        let page = params.iter().find(|p| p.name == "page").unwrap();
        assert!(kind.schema.get("$defs").is_some());
        assert!(page.schema.get("$defs").is_none());
    }
}
