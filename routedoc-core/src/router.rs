use crate::http::{routing, Method, MethodRouter, Request, Router};
use crate::meta::{RouteDescription, RouteEntry, RouteMethod};
use crate::path::join_paths;
use axum::handler::Handler;
use axum::response::IntoResponse;
use axum::routing::Route;
use std::convert::Infallible;
use tower::{Layer, Service};

/// An `axum::Router` that remembers what was registered on it.
///
/// Every registration goes to the inner router unchanged and leaves a
/// [`RouteEntry`] behind, which spec generators walk afterwards.
///
/// # Example
///
/// ```ignore
/// let app = DocumentedRouter::new()
///     .get("/pets", list_pets, describe_route().summary("List pets"))
///     .post("/pets", create_pet, describe_route().input::<ValidatedJson<NewPet>>())
///     .undocumented("/healthz", get(|| async { "ok" }));
///
/// let (router, routes) = app.into_parts();
/// ```
pub struct DocumentedRouter<S = ()> {
    router: Router<S>,
    entries: Vec<RouteEntry>,
}

macro_rules! method_shorthand {
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Register a documented `", stringify!($method), "` handler.")]
            pub fn $name<H, T>(self, path: &str, handler: H, description: RouteDescription) -> Self
            where
                H: Handler<T, S>,
                T: 'static,
            {
                self.route(path, Method::$method, routing::$name(handler), description)
            }
        )*
    };
}

impl<S> DocumentedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            entries: Vec::new(),
        }
    }

    /// Register `method_router` at `path`, documented under `method`.
    pub fn route(
        mut self,
        path: &str,
        method: impl Into<RouteMethod>,
        method_router: MethodRouter<S>,
        description: RouteDescription,
    ) -> Self {
        let method = method.into();
        tracing::debug!(path, method = %method, "Registering documented route");
        self.router = self.router.route(path, method_router);
        self.entries.push(RouteEntry::new(path, method, Some(description)));
        self
    }

    method_shorthand! {
        get => GET,
        post => POST,
        put => PUT,
        patch => PATCH,
        delete => DELETE,
        head => HEAD,
        options => OPTIONS,
        trace => TRACE,
    }

    /// Register a documented handler for every method.
    pub fn any<H, T>(self, path: &str, handler: H, description: RouteDescription) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(path, RouteMethod::All, routing::any(handler), description)
    }

    /// Register a route that carries no documentation.
    pub fn undocumented(mut self, path: &str, method_router: MethodRouter<S>) -> Self {
        tracing::debug!(path, "Registering undocumented route");
        self.router = self.router.route(path, method_router);
        self.entries.push(RouteEntry::new(path, RouteMethod::All, None));
        self
    }

    /// Nest `other` under `prefix`. Panics like `axum::Router::nest` for a root prefix.
    pub fn nest(mut self, prefix: &str, other: DocumentedRouter<S>) -> Self {
        self.router = self.router.nest(prefix, other.router);
        self.entries.extend(other.entries.into_iter().map(|entry| RouteEntry {
            path: join_paths(prefix, &entry.path),
            ..entry
        }));
        self
    }

    pub fn merge(mut self, other: DocumentedRouter<S>) -> Self {
        self.router = self.router.merge(other.router);
        self.entries.extend(other.entries);
        self
    }

    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.router = self.router.layer(layer);
        self
    }

    pub fn fallback<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.router = self.router.fallback(handler);
        self
    }

    /// Provide the router state, keeping the recorded routes.
    pub fn with_state<S2>(self, state: S) -> DocumentedRouter<S2> {
        DocumentedRouter {
            router: self.router.with_state(state),
            entries: self.entries,
        }
    }

    /// All routes registered so far, in registration order.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn into_parts(self) -> (Router<S>, Vec<RouteEntry>) {
        (self.router, self.entries)
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }
}

impl<S> Default for DocumentedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
