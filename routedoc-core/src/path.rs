/// A path parameter discovered in a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    pub name: String,
    pub optional: bool,
}

/// A route path rewritten in OpenAPI templating syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiPath {
    pub path: String,
    pub params: Vec<PathParam>,
}

/// Rewrite a router path into OpenAPI form.
///
/// Accepts both the brace syntax (`/pets/{id}`, `/files/{*rest}`) and the
/// colon syntax (`/pets/:id`, `/pets/:id?`, `/files/*rest`). Regex
/// constraints such as `:id{[0-9]+}` are dropped.
pub fn to_openapi_path(path: &str) -> OpenApiPath {
    let mut params = Vec::new();
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| match parse_param(segment) {
            Some(param) => {
                let rendered = format!("{{{}}}", param.name);
                params.push(param);
                rendered
            }
            None => segment.to_string(),
        })
        .collect();

    let mut path = segments.join("/");
    if path.is_empty() {
        path.push('/');
    }
    OpenApiPath { path, params }
}

fn parse_param(segment: &str) -> Option<PathParam> {
    if let Some(rest) = segment.strip_prefix(':') {
        let (rest, optional) = match rest.strip_suffix('?') {
            Some(r) => (r, true),
            None => (rest, false),
        };
        let name = rest.split('{').next().unwrap_or(rest);
        return Some(PathParam {
            name: name.to_string(),
            optional,
        });
    }

    if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        let name = inner.trim_start_matches('*');
        return Some(PathParam {
            name: if name.is_empty() { "wildcard" } else { name }.to_string(),
            optional: false,
        });
    }

    segment.strip_prefix('*').map(|name| PathParam {
        name: if name.is_empty() { "wildcard" } else { name }.to_string(),
        optional: false,
    })
}

/// Join a nesting prefix and a route path without doubling or dropping slashes.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{path}"),
    }
}

/// Whether the last segment of `path` looks like a file name.
pub fn is_static_file(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.') && parse_param(last).is_none())
}
