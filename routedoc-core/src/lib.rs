//! Route documentation metadata for axum.
//!
//! Handlers are registered on a [`DocumentedRouter`] together with a
//! [`RouteDescription`] built by [`describe_route`]. The router keeps a
//! [`RouteEntry`] per registration so that generators (see
//! `routedoc-openapi`) can walk the routing table afterwards.

pub mod describe;
pub mod error;
pub mod http;
pub mod input;
pub mod meta;
pub mod path;
pub mod router;
pub mod validation;

pub use describe::describe_route;
pub use error::{error_response, HttpError};
pub use input::{schema_for, InputSchema, Target};
pub use meta::{
    ParamDoc, ParamLocation, RequestBodyDoc, ResponseDoc, RouteDescription, RouteEntry,
    RouteMethod, SecurityRequirement, StatusKey,
};
pub use path::{join_paths, to_openapi_path, OpenApiPath, PathParam};
pub use router::DocumentedRouter;
pub use validation::{
    FieldError, ValidatedForm, ValidatedJson, ValidatedPath, ValidatedQuery, ValidationErrorResponse,
};

pub use garde;
pub use schemars;
