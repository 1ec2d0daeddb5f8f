use crate::http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

/// Media type used for bodies that don't name one explicitly.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Every method an `All` route is documented under, before exclusions.
pub const ALL_METHODS: [Method; 8] = [
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::PATCH,
    Method::TRACE,
];

/// The HTTP method a route was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    /// Registered for every method (`axum::routing::any`).
    All,
    Method(Method),
}

impl RouteMethod {
    /// Concrete methods this registration covers.
    pub fn expand(&self) -> Vec<Method> {
        match self {
            RouteMethod::All => ALL_METHODS.to_vec(),
            RouteMethod::Method(m) => vec![m.clone()],
        }
    }

    /// Whether a default registered under `self` applies to `method`.
    pub fn covers(&self, method: &Method) -> bool {
        match self {
            RouteMethod::All => true,
            RouteMethod::Method(m) => m == method,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteMethod::All => "ALL",
            RouteMethod::Method(m) => m.as_str(),
        }
    }
}

impl From<Method> for RouteMethod {
    fn from(method: Method) -> Self {
        RouteMethod::Method(method)
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single registered route, as recorded by
/// [`DocumentedRouter`](crate::router::DocumentedRouter).
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Path as registered with the router (`/pets/{id}`, `/pets/:id`, ...).
    pub path: String,
    pub method: RouteMethod,
    /// `None` for routes registered without documentation.
    pub description: Option<RouteDescription>,
}

impl RouteEntry {
    pub fn new(path: &str, method: impl Into<RouteMethod>, description: Option<RouteDescription>) -> Self {
        Self {
            path: path.to_string(),
            method: method.into(),
            description,
        }
    }
}

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

/// Documentation for one operation parameter.
///
/// Serializes directly to an OpenAPI parameter object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
}

impl ParamDoc {
    /// A string parameter. Path parameters start out required.
    pub fn new(name: &str, location: ParamLocation) -> Self {
        Self {
            name: name.to_string(),
            location,
            required: location == ParamLocation::Path,
            description: None,
            schema: json!({ "type": "string" }),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn schema<T: schemars::JsonSchema>(mut self) -> Self {
        self.schema = crate::input::schema_for::<T>();
        self
    }

    pub fn schema_value(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    /// Identity used when merging parameter lists.
    pub fn key(&self) -> (ParamLocation, &str) {
        (self.location, self.name.as_str())
    }
}

/// Documentation for an operation's request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBodyDoc {
    pub required: bool,
    pub description: Option<String>,
    /// `(media type, schema)` pairs; media types are unique.
    pub content: Vec<(String, Value)>,
}

impl RequestBodyDoc {
    pub fn new(media_type: &str, schema: Value) -> Self {
        let mut body = Self {
            required: true,
            ..Self::default()
        };
        body.set_content(media_type, schema);
        body
    }

    /// Insert or replace the schema for a media type.
    pub fn set_content(&mut self, media_type: &str, schema: Value) {
        match self.content.iter_mut().find(|(mt, _)| mt == media_type) {
            Some(slot) => slot.1 = schema,
            None => self.content.push((media_type.to_string(), schema)),
        }
    }

    fn merge(&mut self, other: RequestBodyDoc) {
        self.required = other.required;
        if other.description.is_some() {
            self.description = other.description;
        }
        for (media_type, schema) in other.content {
            self.set_content(&media_type, schema);
        }
    }
}

/// Key of an entry in an operation's `responses` map: a status code or `default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusKey(String);

impl StatusKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u16> for StatusKey {
    fn from(code: u16) -> Self {
        StatusKey(code.to_string())
    }
}

impl From<StatusCode> for StatusKey {
    fn from(code: StatusCode) -> Self {
        StatusKey(code.as_u16().to_string())
    }
}

impl From<&str> for StatusKey {
    fn from(key: &str) -> Self {
        StatusKey(key.to_string())
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Documentation for one response.
///
/// `status` becomes the key of the `responses` map; the body schema is
/// wrapped under `content/<content type>/schema`, the content type
/// defaulting to [`DEFAULT_CONTENT_TYPE`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDoc {
    pub status: StatusKey,
    pub description: String,
    pub content_type: Option<String>,
    pub schema: Option<Value>,
    pub headers: Vec<(String, Value)>,
}

impl ResponseDoc {
    pub fn new(status: impl Into<StatusKey>, description: &str) -> Self {
        Self {
            status: status.into(),
            description: description.to_string(),
            content_type: None,
            schema: None,
            headers: Vec::new(),
        }
    }

    pub fn schema<T: schemars::JsonSchema>(mut self) -> Self {
        self.schema = Some(crate::input::schema_for::<T>());
        self
    }

    pub fn schema_value(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn header(mut self, name: &str, schema: Value) -> Self {
        self.headers.push((name.to_string(), schema));
        self
    }

    /// Render as an OpenAPI response object, passing every schema through `schema_fn`.
    pub fn to_openapi(&self, mut schema_fn: impl FnMut(&Value) -> Value) -> Value {
        let mut response = Map::new();
        response.insert("description".into(), json!(self.description));

        if !self.headers.is_empty() {
            let headers: Map<String, Value> = self
                .headers
                .iter()
                .map(|(name, schema)| (name.clone(), json!({ "schema": schema_fn(schema) })))
                .collect();
            response.insert("headers".into(), Value::Object(headers));
        }

        let media_type = self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        let media = match (&self.schema, &self.content_type) {
            (Some(schema), _) => Some(json!({ "schema": schema_fn(schema) })),
            (None, Some(_)) => Some(json!({})),
            (None, None) => None,
        };
        if let Some(media) = media {
            let mut content = Map::new();
            content.insert(media_type.to_string(), media);
            response.insert("content".into(), Value::Object(content));
        }

        Value::Object(response)
    }
}

/// A single security requirement: a scheme name and the scopes it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityRequirement {
    pub scheme: String,
    pub scopes: Vec<String>,
}

/// Documentation attached to a route handler.
///
/// Built with [`describe_route`](crate::describe::describe_route).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDescription {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    /// Hidden routes are served but left out of the generated document.
    pub hide: bool,
    pub security: Vec<SecurityRequirement>,
    pub parameters: Vec<ParamDoc>,
    pub request_body: Option<RequestBodyDoc>,
    pub responses: Vec<ResponseDoc>,
    /// Extra operation keys (`x-*` and friends), copied verbatim.
    pub extensions: Map<String, Value>,
}

impl RouteDescription {
    /// Merge `other` on top of `self`. Later values win.
    pub fn merge(&mut self, other: RouteDescription) {
        if other.summary.is_some() {
            self.summary = other.summary;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.operation_id.is_some() {
            self.operation_id = other.operation_id;
        }
        for tag in other.tags {
            self.push_tag(tag);
        }
        self.deprecated |= other.deprecated;
        self.hide |= other.hide;
        if !other.security.is_empty() {
            self.security = other.security;
        }
        for param in other.parameters {
            self.upsert_param(param);
        }
        if let Some(theirs) = other.request_body {
            self.request_body = Some(match self.request_body.take() {
                Some(mut mine) => {
                    mine.merge(theirs);
                    mine
                }
                None => theirs,
            });
        }
        for response in other.responses {
            self.upsert_response(response);
        }
        self.extensions.extend(other.extensions);
    }

    pub(crate) fn push_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub(crate) fn upsert_param(&mut self, param: ParamDoc) {
        match self.parameters.iter_mut().find(|p| p.key() == param.key()) {
            Some(slot) => *slot = param,
            None => self.parameters.push(param),
        }
    }

    pub(crate) fn upsert_response(&mut self, response: ResponseDoc) {
        match self.responses.iter_mut().find(|r| r.status == response.status) {
            Some(slot) => *slot = response,
            None => self.responses.push(response),
        }
    }
}
