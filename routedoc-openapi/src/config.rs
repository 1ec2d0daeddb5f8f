use routedoc_core::http::Method;
use routedoc_core::meta::{RouteDescription, RouteMethod};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Error type for loading OpenAPI configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The documentation file could not be read.
    Load(String),
    /// The documentation is not valid YAML, or not a mapping.
    Parse(String),
    /// A required key is missing.
    MissingKey(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "OpenAPI config load error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "OpenAPI config parse error: {msg}"),
            ConfigError::MissingKey(key) => write!(f, "OpenAPI config key not found: {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// An entry of the document's `servers` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Configuration for the generated OpenAPI specification.
#[derive(Debug)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub openapi_version: String,
    pub servers: Vec<Server>,
    /// Top-level keys deep-merged over the generated document
    /// (`tags`, `security`, `externalDocs`, `components`, extra `info` keys, ...).
    pub documentation: Map<String, Value>,
    /// Skip routes whose last path segment looks like a file name.
    pub exclude_static_files: bool,
    /// Exact paths, or prefixes when ending in `*`.
    pub exclude: Vec<String>,
    pub exclude_methods: Vec<Method>,
    pub exclude_tags: Vec<String>,
    /// Emit routes registered without documentation.
    pub include_undocumented: bool,
    /// Descriptions merged under every matching route's own description.
    pub defaults: Vec<(RouteMethod, RouteDescription)>,
    pub docs_ui: bool,
    pub spec_path: String,
    pub yaml_path: Option<String>,
    pub docs_path: String,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            openapi_version: "3.1.0".to_string(),
            servers: Vec::new(),
            documentation: Map::new(),
            exclude_static_files: true,
            exclude: Vec::new(),
            exclude_methods: vec![Method::OPTIONS],
            exclude_tags: Vec::new(),
            include_undocumented: false,
            defaults: Vec::new(),
            docs_ui: false,
            spec_path: "/openapi.json".to_string(),
            yaml_path: None,
            docs_path: "/docs".to_string(),
        }
    }

    /// Load a documentation skeleton from YAML (or JSON, which is valid YAML).
    ///
    /// `info.title` and `info.version` are required; `info.description`,
    /// `openapi` and `servers` map onto the matching fields and every other
    /// key lands in [`documentation`](Self::documentation).
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let Value::Object(mut root) = value else {
            return Err(ConfigError::Parse("expected a mapping at the document root".into()));
        };

        let mut info = match root.remove("info") {
            Some(Value::Object(info)) => info,
            Some(_) => return Err(ConfigError::Parse("`info` must be a mapping".into())),
            None => return Err(ConfigError::MissingKey("info")),
        };
        let title = take_string(&mut info, "title").ok_or(ConfigError::MissingKey("info.title"))?;
        let version =
            take_string(&mut info, "version").ok_or(ConfigError::MissingKey("info.version"))?;

        let mut config = Self::new(&title, &version);
        config.description = take_string(&mut info, "description");
        if let Some(openapi) = take_string(&mut root, "openapi") {
            config.openapi_version = openapi;
        }
        if let Some(Value::Array(servers)) = root.remove("servers") {
            config.servers = servers
                .iter()
                .filter_map(|server| {
                    let url = server.get("url")?.as_str()?;
                    Some(Server {
                        url: url.to_string(),
                        description: server
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    })
                })
                .collect();
        }
        if !info.is_empty() {
            root.insert("info".into(), Value::Object(info));
        }
        config.documentation = root;
        Ok(config)
    }

    /// Load a documentation skeleton from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_openapi_version(mut self, version: &str) -> Self {
        self.openapi_version = version.to_string();
        self
    }

    pub fn with_server(mut self, url: &str, description: Option<&str>) -> Self {
        self.servers.push(Server {
            url: url.to_string(),
            description: description.map(str::to_string),
        });
        self
    }

    /// Set a top-level document key, e.g. `tags` or `components`.
    pub fn with_documentation(mut self, key: &str, value: Value) -> Self {
        self.documentation.insert(key.to_string(), value);
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }

    pub fn with_exclude_static_files(mut self, enabled: bool) -> Self {
        self.exclude_static_files = enabled;
        self
    }

    pub fn exclude_path(mut self, path: &str) -> Self {
        self.exclude.push(path.to_string());
        self
    }

    pub fn with_exclude_methods(mut self, methods: Vec<Method>) -> Self {
        self.exclude_methods = methods;
        self
    }

    pub fn exclude_tag(mut self, tag: &str) -> Self {
        self.exclude_tags.push(tag.to_string());
        self
    }

    pub fn with_undocumented(mut self, enabled: bool) -> Self {
        self.include_undocumented = enabled;
        self
    }

    /// Merge `description` under every route registered for `method`.
    pub fn with_default(mut self, method: impl Into<RouteMethod>, description: RouteDescription) -> Self {
        self.defaults.push((method.into(), description));
        self
    }

    pub fn with_spec_path(mut self, path: &str) -> Self {
        self.spec_path = path.to_string();
        self
    }

    pub fn with_yaml_path(mut self, path: &str) -> Self {
        self.yaml_path = Some(path.to_string());
        self
    }

    pub fn with_docs_path(mut self, path: &str) -> Self {
        self.docs_path = path.to_string();
        self
    }

    /// Whether an OpenAPI path is listed in [`exclude`](Self::exclude).
    pub fn is_path_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => pattern == path,
        })
    }

    /// Targeting a 3.0.x document rather than 3.1.
    pub fn is_legacy(&self) -> bool {
        self.openapi_version.starts_with("3.0")
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}
