use http_body_util::BodyExt;
use routedoc_core::http::{routing, Body, HeaderValue, Method, Request, Response, Router, StatusCode};
use routedoc_core::meta::RouteMethod;
use routedoc_core::{describe_route, DocumentedRouter};
use tower::util::MapResponseLayer;
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────────────────────

async fn call(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn pets() -> DocumentedRouter {
    DocumentedRouter::new()
        .get("/pets", || async { "list" }, describe_route().summary("List pets"))
        .post("/pets", || async { "create" }, describe_route().summary("Create pet"))
}

// ── Recording ───────────────────────────────────────────────────────────────

#[test]
fn records_each_registration() {
    let router = pets();
    let routes = router.routes();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].path, "/pets");
    assert_eq!(routes[0].method, RouteMethod::Method(Method::GET));
    assert_eq!(routes[1].method, RouteMethod::Method(Method::POST));
    assert_eq!(
        routes[0].description.as_ref().unwrap().summary.as_deref(),
        Some("List pets")
    );
}

#[test]
fn any_is_recorded_as_all() {
    let router: DocumentedRouter =
        DocumentedRouter::new().any("/echo", || async { "echo" }, describe_route());
    assert_eq!(router.routes()[0].method, RouteMethod::All);
}

#[test]
fn undocumented_has_no_description() {
    let router: DocumentedRouter =
        DocumentedRouter::new().undocumented("/healthz", routing::get(|| async { "ok" }));
    let entry = &router.routes()[0];
    assert_eq!(entry.method, RouteMethod::All);
    assert!(entry.description.is_none());
}

#[test]
fn nest_prefixes_recorded_paths() {
    let router: DocumentedRouter = DocumentedRouter::new().nest("/api/v1", pets());
    let paths: Vec<&str> = router.routes().iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/api/v1/pets", "/api/v1/pets"]);
}

#[test]
fn merge_keeps_both_tables() {
    let other = DocumentedRouter::new().get("/owners", || async { "owners" }, describe_route());
    let router = pets().merge(other);
    assert_eq!(router.routes().len(), 3);
}

#[test]
fn into_parts_returns_entries() {
    let (_, routes) = pets().into_parts();
    assert_eq!(routes.len(), 2);
}

// ── Serving ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn documented_routes_are_served() {
    let router = pets().into_router();
    let (status, body) = call(router.clone(), Method::GET, "/pets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "list");

    let (status, body) = call(router, Method::POST, "/pets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "create");
}

#[tokio::test]
async fn nested_routes_are_served() {
    let router = DocumentedRouter::new().nest("/api", pets()).into_router();
    let (status, body) = call(router, Method::GET, "/api/pets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "list");
}

#[tokio::test]
async fn unregistered_method_is_rejected() {
    let router = pets().into_router();
    let (status, _) = call(router, Method::DELETE, "/pets").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn state_is_applied() {
    use routedoc_core::http::State;

    let router = DocumentedRouter::<String>::new()
        .get(
            "/greeting",
            |State(greeting): State<String>| async move { greeting },
            describe_route(),
        )
        .with_state::<()>("hello".to_string());
    assert_eq!(router.routes().len(), 1);

    let (status, body) = call(router.into_router(), Method::GET, "/greeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn fallback_handles_unknown_paths() {
    let router = pets()
        .fallback(|| async { (StatusCode::NOT_FOUND, "nope") })
        .into_router();
    let (status, body) = call(router, Method::GET, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "nope");
}

#[tokio::test]
async fn layer_wraps_registered_routes() {
    let router = pets()
        .layer(MapResponseLayer::new(|mut response: Response| {
            response
                .headers_mut()
                .insert("x-routedoc", HeaderValue::from_static("layered"));
            response
        }))
        .into_router();

    let req = Request::builder().uri("/pets").body(Body::empty()).unwrap();
    let response = router.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-routedoc"], "layered");
}

#[test]
fn layer_keeps_recorded_routes() {
    let router = pets().layer(MapResponseLayer::new(|response: Response| response));
    assert_eq!(router.routes().len(), 2);
}
