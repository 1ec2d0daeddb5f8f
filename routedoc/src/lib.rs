//! routedoc: describe axum routes, serve an OpenAPI document.
//!
//! This facade crate re-exports the routedoc sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use routedoc::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate              |
//! |-----------|---------|--------------------|
//! | `openapi` | **yes** | `routedoc-openapi` |

pub extern crate routedoc_core;

// Everything from routedoc-core at the top level.
pub use routedoc_core::*;

#[cfg(feature = "openapi")]
pub use routedoc_openapi;

#[cfg(feature = "openapi")]
pub use routedoc_openapi::{build_spec, openapi_routes, ConfigError, OpenApiConfig};

/// Unified prelude. Import everything with `use routedoc::prelude::*`.
pub mod prelude {
    pub use routedoc_core::describe_route;
    pub use routedoc_core::http::{
        Form, IntoResponse, Json, Path, Query, Response, Router, State, StatusCode,
    };
    pub use routedoc_core::meta::{
        ParamDoc, ParamLocation, ResponseDoc, RouteDescription, RouteMethod,
    };
    pub use routedoc_core::schemars::JsonSchema;
    pub use routedoc_core::validation::Validate;
    pub use routedoc_core::{
        DocumentedRouter, HttpError, ValidatedForm, ValidatedJson, ValidatedPath, ValidatedQuery,
    };

    #[cfg(feature = "openapi")]
    pub use routedoc_openapi::{DocumentedRouterExt, OpenApiConfig};
}
