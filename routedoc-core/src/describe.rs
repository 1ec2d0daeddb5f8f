use crate::input::{params_from_schema, schema_for, InputSchema, Target};
use crate::meta::{ParamDoc, RequestBodyDoc, ResponseDoc, RouteDescription, SecurityRequirement};
use schemars::JsonSchema;
use serde_json::Value;

/// Start describing a route handler.
///
/// # Example
///
/// ```ignore
/// use routedoc_core::describe_route;
/// use routedoc_core::meta::ResponseDoc;
///
/// let doc = describe_route()
///     .summary("Fetch a pet")
///     .tag("pets")
///     .input::<Path<PetPath>>()
///     .response(ResponseDoc::new(200, "The pet").schema::<Pet>())
///     .response(ResponseDoc::new(404, "No such pet"));
/// ```
pub fn describe_route() -> RouteDescription {
    RouteDescription::default()
}

impl RouteDescription {
    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn operation_id(mut self, operation_id: &str) -> Self {
        self.operation_id = Some(operation_id.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.push_tag(tag.to_string());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for tag in tags {
            self.push_tag(tag.into());
        }
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Keep the route out of the generated document.
    pub fn hide(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Require `scheme` (a name under `components/securitySchemes`) with the given scopes.
    pub fn security(mut self, scheme: &str, scopes: &[&str]) -> Self {
        self.security.push(SecurityRequirement {
            scheme: scheme.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn param(mut self, param: ParamDoc) -> Self {
        self.upsert_param(param);
        self
    }

    /// Document an extractor's schema at the location the extractor reads from.
    pub fn input<I: InputSchema>(self) -> Self {
        self.input_schema(I::target(), I::schema())
    }

    /// Document `T`'s schema at an explicit target, e.g. headers or cookies.
    pub fn input_as<T: JsonSchema>(self, target: Target) -> Self {
        self.input_schema(target, schema_for::<T>())
    }

    /// Document a raw schema value at `target`.
    ///
    /// Body targets set the request body for the target's media type;
    /// the others expand the object schema into one parameter per property.
    pub fn input_schema(mut self, target: Target, schema: Value) -> Self {
        match (target.media_type(), target.location()) {
            (Some(media_type), _) => self.set_body(media_type, schema),
            (None, Some(location)) => {
                for param in params_from_schema(location, &schema) {
                    self.upsert_param(param);
                }
            }
            (None, None) => {}
        }
        self
    }

    pub fn request_body<T: JsonSchema>(mut self, media_type: &str) -> Self {
        self.set_body(media_type, schema_for::<T>());
        self
    }

    pub fn response(mut self, response: ResponseDoc) -> Self {
        self.upsert_response(response);
        self
    }

    /// Shorthand for a JSON response carrying `T`.
    pub fn response_with<T: JsonSchema>(self, status: u16, description: &str) -> Self {
        self.response(ResponseDoc::new(status, description).schema::<T>())
    }

    pub fn extension(mut self, key: &str, value: Value) -> Self {
        self.extensions.insert(key.to_string(), value);
        self
    }

    fn set_body(&mut self, media_type: &str, schema: Value) {
        match self.request_body.as_mut() {
            Some(body) => body.set_content(media_type, schema),
            None => self.request_body = Some(RequestBodyDoc::new(media_type, schema)),
        }
    }
}
