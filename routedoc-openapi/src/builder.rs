use crate::config::OpenApiConfig;
use crate::schema::SchemaRegistry;
use routedoc_core::http::Method;
use routedoc_core::meta::{ParamDoc, ParamLocation, RouteDescription, RouteEntry, RouteMethod};
use routedoc_core::path::{is_static_file, to_openapi_path, OpenApiPath};
use serde_json::{json, Map, Value};

/// One operation after filtering and merging, before rendering.
struct PendingOperation {
    path: OpenApiPath,
    method: Method,
    description: RouteDescription,
}

/// Build an OpenAPI JSON spec from config and recorded routes.
pub fn build_spec(config: &OpenApiConfig, routes: &[RouteEntry]) -> Value {
    let pending = collect_operations(config, routes);
    let mut registry = if config.is_legacy() {
        SchemaRegistry::legacy()
    } else {
        SchemaRegistry::new()
    };

    let mut paths: Map<String, Value> = Map::new();
    for op in &pending {
        let operation = build_operation(op, &mut registry);
        let path_entry = paths.entry(op.path.path.clone()).or_insert_with(|| json!({}));
        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(op.method.as_str().to_lowercase(), operation);
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    let mut doc: Map<String, Value> = Map::new();
    doc.insert("openapi".into(), json!(config.openapi_version));
    doc.insert("info".into(), Value::Object(info));
    if !config.servers.is_empty() {
        doc.insert("servers".into(), json!(config.servers));
    }
    doc.insert("paths".into(), Value::Object(paths));

    // Documented component schemas replace generated ones of the same name.
    let mut overlay = config.documentation.clone();
    for (name, schema) in take_documented_schemas(&mut overlay) {
        registry.register(&name, schema);
    }

    tracing::debug!(
        operations = pending.len(),
        schemas = registry.len(),
        "Generated OpenAPI document"
    );

    if !registry.is_empty() {
        doc.insert(
            "components".into(),
            json!({ "schemas": registry.into_schemas() }),
        );
    }

    let mut doc = Value::Object(doc);
    deep_merge(&mut doc, Value::Object(overlay));
    doc
}

/// Remove `components.schemas` from the documentation overlay.
fn take_documented_schemas(overlay: &mut Map<String, Value>) -> Map<String, Value> {
    let Some(Value::Object(components)) = overlay.get_mut("components") else {
        return Map::new();
    };
    match components.remove("schemas") {
        Some(Value::Object(schemas)) => schemas,
        _ => Map::new(),
    }
}

/// Filter the routing table and merge entries sharing a path and method.
fn collect_operations(config: &OpenApiConfig, routes: &[RouteEntry]) -> Vec<PendingOperation> {
    let mut pending: Vec<PendingOperation> = Vec::new();

    for entry in routes {
        let path = to_openapi_path(&entry.path);
        if config.is_path_excluded(&path.path)
            || (config.exclude_static_files && is_static_file(&entry.path))
        {
            continue;
        }

        for method in entry.method.expand() {
            if config.exclude_methods.contains(&method) {
                continue;
            }
            let Some(description) = effective_description(config, &method, entry.description.as_ref())
            else {
                continue;
            };

            match pending
                .iter_mut()
                .find(|op| op.path.path == path.path && op.method == method)
            {
                Some(existing) => {
                    tracing::debug!(path = %path.path, method = %method, "Merging repeated operation");
                    existing.description.merge(description);
                }
                None => pending.push(PendingOperation {
                    path: path.clone(),
                    method,
                    description,
                }),
            }
        }
    }

    pending.retain(|op| {
        !op.description.hide
            && !op
                .description
                .tags
                .iter()
                .any(|tag| config.exclude_tags.contains(tag))
    });
    pending
}

/// Defaults for `All`, then defaults for `method`, then the route's own description.
fn effective_description(
    config: &OpenApiConfig,
    method: &Method,
    own: Option<&RouteDescription>,
) -> Option<RouteDescription> {
    let generic = config
        .defaults
        .iter()
        .filter(|(m, _)| *m == RouteMethod::All);
    let specific = config
        .defaults
        .iter()
        .filter(|(m, _)| *m != RouteMethod::All && m.covers(method));

    let mut merged: Option<RouteDescription> = None;
    for (_, default) in generic.chain(specific) {
        merged
            .get_or_insert_with(RouteDescription::default)
            .merge(default.clone());
    }

    match own {
        Some(own) => merged
            .get_or_insert_with(RouteDescription::default)
            .merge(own.clone()),
        None if config.include_undocumented => {
            merged.get_or_insert_with(RouteDescription::default);
        }
        None => {}
    }
    merged
}

fn build_operation(op: &PendingOperation, registry: &mut SchemaRegistry) -> Value {
    let desc = &op.description;
    let mut operation: Map<String, Value> = Map::new();

    let operation_id = desc
        .operation_id
        .clone()
        .unwrap_or_else(|| generate_operation_id(&op.method, &op.path.path));
    operation.insert("operationId".into(), json!(operation_id));

    if !desc.tags.is_empty() {
        operation.insert("tags".into(), json!(desc.tags));
    }
    if let Some(ref summary) = desc.summary {
        operation.insert("summary".into(), json!(summary));
    }
    if let Some(ref description) = desc.description {
        operation.insert("description".into(), json!(description));
    }
    if desc.deprecated {
        operation.insert("deprecated".into(), json!(true));
    }

    // Parameters: declared ones, plus path parameters nobody declared.
    let mut params: Vec<ParamDoc> = desc.parameters.clone();
    for path_param in &op.path.params {
        let declared = params
            .iter()
            .any(|p| p.location == ParamLocation::Path && p.name == path_param.name);
        if !declared {
            params.push(ParamDoc::new(&path_param.name, ParamLocation::Path));
        }
    }
    if !params.is_empty() {
        let rendered: Vec<Value> = params
            .into_iter()
            .map(|mut param| {
                // OpenAPI requires path parameters to be required.
                if param.location == ParamLocation::Path {
                    param.required = true;
                }
                param.schema = registry.normalize(&param.schema);
                serde_json::to_value(&param).unwrap_or(Value::Null)
            })
            .collect();
        operation.insert("parameters".into(), json!(rendered));
    }

    // Request body
    if let Some(ref body) = desc.request_body {
        let mut content: Map<String, Value> = Map::new();
        for (media_type, schema) in &body.content {
            content.insert(media_type.clone(), json!({ "schema": registry.normalize(schema) }));
        }
        let mut request_body: Map<String, Value> = Map::new();
        if let Some(ref description) = body.description {
            request_body.insert("description".into(), json!(description));
        }
        request_body.insert("required".into(), json!(body.required));
        request_body.insert("content".into(), Value::Object(content));
        operation.insert("requestBody".into(), Value::Object(request_body));
    }

    // Responses
    let mut responses: Map<String, Value> = Map::new();
    for response in &desc.responses {
        responses.insert(
            response.status.to_string(),
            response.to_openapi(|schema| registry.normalize(schema)),
        );
    }
    if responses.is_empty() {
        responses.insert("200".into(), json!({ "description": "Successful response" }));
    }
    operation.insert("responses".into(), Value::Object(responses));

    // Security
    if !desc.security.is_empty() {
        let security: Vec<Value> = desc
            .security
            .iter()
            .map(|req| {
                let mut requirement = Map::new();
                requirement.insert(req.scheme.clone(), json!(req.scopes));
                Value::Object(requirement)
            })
            .collect();
        operation.insert("security".into(), json!(security));
    }

    for (key, value) in &desc.extensions {
        operation.insert(key.clone(), value.clone());
    }

    Value::Object(operation)
}

/// `GET /pets/{id}/toys` becomes `getPetsByIdToys`.
pub fn generate_operation_id(method: &Method, path: &str) -> String {
    let mut id = method.as_str().to_lowercase();
    let mut any_segment = false;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        any_segment = true;
        match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => {
                id.push_str("By");
                id.push_str(&camel_case(param));
            }
            None => id.push_str(&camel_case(segment)),
        }
    }
    if !any_segment {
        id.push_str("Index");
    }
    id
}

fn camel_case(word: &str) -> String {
    word.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Merge `overlay` into `base`: objects key by key, anything else replaced.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
