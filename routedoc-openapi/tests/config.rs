use routedoc_core::http::Method;
use routedoc_openapi::{ConfigError, OpenApiConfig};
use std::io::Write;

// ── Builder ─────────────────────────────────────────────────────────────────

#[test]
fn config_new() {
    let config = OpenApiConfig::new("My API", "1.0.0");
    assert_eq!(config.title, "My API");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert_eq!(config.openapi_version, "3.1.0");
    assert!(!config.docs_ui);
    assert!(config.exclude_static_files);
    assert_eq!(config.exclude_methods, vec![Method::OPTIONS]);
    assert_eq!(config.spec_path, "/openapi.json");
    assert_eq!(config.docs_path, "/docs");
    assert!(config.yaml_path.is_none());
}

#[test]
fn config_with_description() {
    let config = OpenApiConfig::new("My API", "1.0.0").with_description("A great API");
    assert_eq!(config.description.as_deref(), Some("A great API"));
}

#[test]
fn config_with_docs_ui_toggle() {
    let config = OpenApiConfig::new("My API", "1.0.0")
        .with_docs_ui(true)
        .with_docs_ui(false);
    assert!(!config.docs_ui);
}

#[test]
fn exclusion_patterns() {
    let config = OpenApiConfig::new("API", "1")
        .exclude_path("/internal/*")
        .exclude_path("/healthz");
    assert!(config.is_path_excluded("/healthz"));
    assert!(config.is_path_excluded("/internal/metrics"));
    assert!(!config.is_path_excluded("/healthz/deep"));
    assert!(!config.is_path_excluded("/pets"));
}

#[test]
fn legacy_detection() {
    assert!(!OpenApiConfig::new("API", "1").is_legacy());
    assert!(OpenApiConfig::new("API", "1").with_openapi_version("3.0.3").is_legacy());
}

// ── YAML loading ────────────────────────────────────────────────────────────

const DOC: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 2.1.0
  description: Pets, owners and toys
  contact:
    name: Store team
servers:
  - url: https://api.example.com
    description: Production
  - url: http://localhost:3000
tags:
  - name: pets
    description: Everything about pets
components:
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
"#;

#[test]
fn yaml_maps_known_keys() {
    let config = OpenApiConfig::from_yaml_str(DOC).unwrap();
    assert_eq!(config.title, "Petstore");
    assert_eq!(config.version, "2.1.0");
    assert_eq!(config.description.as_deref(), Some("Pets, owners and toys"));
    assert_eq!(config.openapi_version, "3.0.3");
    assert_eq!(config.servers.len(), 2);
    assert_eq!(config.servers[0].description.as_deref(), Some("Production"));
    assert!(config.servers[1].description.is_none());
}

#[test]
fn yaml_keeps_remaining_keys_as_documentation() {
    let config = OpenApiConfig::from_yaml_str(DOC).unwrap();
    assert!(config.documentation.contains_key("tags"));
    assert!(config.documentation.contains_key("components"));
    assert_eq!(config.documentation["info"]["contact"]["name"], "Store team");
    assert!(config.documentation["info"].get("title").is_none());
    assert!(!config.documentation.contains_key("servers"));
}

#[test]
fn yaml_numeric_version_is_stringified() {
    let config = OpenApiConfig::from_yaml_str("info:\n  title: API\n  version: 1.5\n").unwrap();
    assert_eq!(config.version, "1.5");
}

#[test]
fn yaml_missing_title() {
    let err = OpenApiConfig::from_yaml_str("info:\n  version: 1.0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey("info.title")));
}

#[test]
fn yaml_missing_info() {
    let err = OpenApiConfig::from_yaml_str("openapi: 3.1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey("info")));
}

#[test]
fn yaml_not_a_mapping() {
    let err = OpenApiConfig::from_yaml_str("- just\n- a list\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn yaml_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOC.as_bytes()).unwrap();
    let config = OpenApiConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.title, "Petstore");
}

#[test]
fn yaml_missing_file() {
    let err = OpenApiConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
    assert!(err.to_string().contains("here.yaml"));
}
