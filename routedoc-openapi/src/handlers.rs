use crate::builder::build_spec;
use crate::config::OpenApiConfig;
use routedoc_core::http::{routing::get, Html, IntoResponse, Router};
use routedoc_core::meta::RouteEntry;
use std::sync::Arc;

struct OpenApiState {
    spec_json: String,
    spec_yaml: Option<String>,
    docs_html: String,
}

/// Build an `axum::Router` that serves the generated spec and optionally a docs UI.
///
/// The spec is rendered once, up front; requests only copy the cached text.
pub fn openapi_routes<S: Clone + Send + Sync + 'static>(
    config: OpenApiConfig,
    routes: &[RouteEntry],
) -> Router<S> {
    let spec = build_spec(&config, routes);
    let spec_json = serde_json::to_string_pretty(&spec).unwrap_or_else(|_| "{}".to_string());
    let spec_yaml = match config.yaml_path {
        Some(_) => match serde_yaml::to_string(&spec) {
            Ok(yaml) => Some(yaml),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to render OpenAPI document as YAML");
                None
            }
        },
        None => None,
    };

    let state = Arc::new(OpenApiState {
        spec_json,
        spec_yaml,
        docs_html: docs_html(&config.title, &config.spec_path),
    });

    let state_json = state.clone();
    let mut router = Router::<S>::new().route(
        &config.spec_path,
        get(move || {
            let json = state_json.spec_json.clone();
            async move { ([("content-type", "application/json")], json).into_response() }
        }),
    );

    if let (Some(path), Some(_)) = (&config.yaml_path, &state.spec_yaml) {
        let state_yaml = state.clone();
        router = router.route(
            path,
            get(move || {
                let yaml = state_yaml.spec_yaml.clone().unwrap_or_default();
                async move { ([("content-type", "application/yaml")], yaml).into_response() }
            }),
        );
    }

    if config.docs_ui {
        let state_ui = state.clone();
        router = router.route(
            &config.docs_path,
            get(move || {
                let html = state_ui.docs_html.clone();
                async move { Html(html).into_response() }
            }),
        );
    }

    tracing::info!(
        spec = %config.spec_path,
        docs = config.docs_ui,
        "OpenAPI routes installed"
    );
    router
}

fn docs_html(title: &str, spec_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{
                url: "{spec_url}",
                dom_id: '#swagger-ui',
                deepLinking: true,
            }});
        }};
    </script>
</body>
</html>"#,
        title = escape_html(title),
        spec_url = escape_html(spec_url),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
