use crate::builder::build_spec;
use crate::config::OpenApiConfig;
use crate::handlers::openapi_routes;
use routedoc_core::http::Router;
use routedoc_core::DocumentedRouter;
use serde_json::Value;

/// OpenAPI generation for a [`DocumentedRouter`].
///
/// # Example
///
/// ```ignore
/// use routedoc_openapi::{DocumentedRouterExt, OpenApiConfig};
///
/// let app = DocumentedRouter::new()
///     .get("/pets", list_pets, describe_route().summary("List pets"))
///     .with_openapi(OpenApiConfig::new("Petstore", "1.0.0").with_docs_ui(true));
/// ```
pub trait DocumentedRouterExt<S> {
    /// Generate the document for the routes registered so far.
    fn openapi_spec(&self, config: &OpenApiConfig) -> Value;

    /// Finish the router, adding the routes that serve its document.
    fn with_openapi(self, config: OpenApiConfig) -> Router<S>;
}

impl<S> DocumentedRouterExt<S> for DocumentedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn openapi_spec(&self, config: &OpenApiConfig) -> Value {
        build_spec(config, self.routes())
    }

    fn with_openapi(self, config: OpenApiConfig) -> Router<S> {
        let (router, routes) = self.into_parts();
        router.merge(openapi_routes::<S>(config, &routes))
    }
}
