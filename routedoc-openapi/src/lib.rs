//! OpenAPI document generation for routedoc.
//!
//! [`build_spec`] walks the routes recorded by a
//! [`DocumentedRouter`](routedoc_core::DocumentedRouter) and assembles an
//! OpenAPI 3.1 document (3.0 on request). [`openapi_routes`] and
//! [`DocumentedRouterExt::with_openapi`] serve it over HTTP.

mod builder;
mod config;
mod ext;
mod handlers;
pub mod schema;

pub use builder::{build_spec, deep_merge, generate_operation_id};
pub use config::{ConfigError, OpenApiConfig, Server};
pub use ext::DocumentedRouterExt;
pub use handlers::openapi_routes;
pub use schema::SchemaRegistry;
