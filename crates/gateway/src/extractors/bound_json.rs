//! Binding JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;
use domain::{FieldError, FieldErrors};

/// JSON extractor that binds the payload and collects validation failures.
///
/// Unlike a plain validating extractor, a payload that fails its rules is
/// still handed to the handler together with the field errors, so the
/// service can decide how to report them. Only malformed JSON is rejected
/// outright.
pub struct BoundJson<T>(pub T, pub FieldErrors);

#[async_trait]
impl<S, T> FromRequest<S> for BoundJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let errors = match value.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => to_field_errors(&e),
        };

        Ok(BoundJson(value, errors))
    }
}

/// Flatten validator output into field errors, ordered by field name.
pub(crate) fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                FieldError::new(field.clone(), e.code.to_string(), message)
            })
        })
        .collect()
}

/// `first_name` -> `firstName`, matching the wire names of the forms.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
