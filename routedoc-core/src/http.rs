//! Re-exports of the axum types routedoc builds on.

pub use axum::body::Body;
pub use axum::extract::{Form, FromRequest, FromRequestParts, Path, Query, Request, State};
pub use axum::http::{HeaderValue, Method, StatusCode};
pub use axum::response::{Html, IntoResponse, Response};
pub use axum::routing::{self, MethodRouter};
pub use axum::{Json, Router};
