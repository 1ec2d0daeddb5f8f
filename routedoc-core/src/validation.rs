use crate::error::HttpError;
use crate::http::{Form, FromRequest, FromRequestParts, Json, Path, Query, Request};
use crate::input::{schema_for, InputSchema, Target};
use axum::http::request::Parts;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use garde::Validate;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Run garde validation on an extracted value.
pub fn validate<T>(value: &T) -> Result<(), HttpError>
where
    T: Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| HttpError::Validation(convert_garde_report(&report)))
}

fn convert_garde_report(report: &garde::Report) -> ValidationErrorResponse {
    let errors = report
        .iter()
        .map(|(path, error)| {
            let field = path.to_string();
            FieldError {
                field: if field.is_empty() { "value".to_string() } else { field },
                message: error.message().to_string(),
                code: "validation".to_string(),
            }
        })
        .collect();
    ValidationErrorResponse { errors }
}

/// `Json<T>` that also runs `garde::Validate`.
///
/// Rejects with a structured 400 when the body is malformed or invalid.
///
/// ```ignore
/// async fn create(ValidatedJson(pet): ValidatedJson<NewPet>) -> Json<Pet> {
///     // pet passed validation
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// `Query<T>` that also runs `garde::Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

/// `Form<T>` that also runs `garde::Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

/// `Path<T>` that also runs `garde::Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        validate(&value)?;
        Ok(ValidatedForm(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        validate(&value)?;
        Ok(ValidatedQuery(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        validate(&value)?;
        Ok(ValidatedPath(value))
    }
}

macro_rules! validated_input_schema {
    ($($extractor:ident => $target:ident),* $(,)?) => {
        $(
            impl<T: JsonSchema> InputSchema for $extractor<T> {
                fn target() -> Target {
                    Target::$target
                }

                fn schema() -> Value {
                    schema_for::<T>()
                }
            }
        )*
    };
}

validated_input_schema! {
    ValidatedJson => Json,
    ValidatedForm => Form,
    ValidatedQuery => Query,
    ValidatedPath => Param,
}
