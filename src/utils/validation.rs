//! Schema validation for request bodies.
//!
//! Each payload type declares the field names it reports on; a failed check
//! renders every one of them, with `null` for the fields that passed.

use std::fmt;
use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::Error;
use crate::models::user::Role;

/// A validated request body with the list of fields its error payload names.
pub trait Schema: Validate {
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(Map<String, Value>);

impl FieldErrors {
    pub fn from_validation<T: Schema>(errors: &ValidationErrors) -> Self {
        let by_field = errors.field_errors();
        let mut map = Map::new();
        for field in T::FIELDS {
            let snake = snake_case(field);
            let messages = by_field
                .get(*field)
                .or_else(|| by_field.get(snake.as_str()))
                .map(|list| list.iter().map(message_of).collect::<Vec<_>>());
            map.insert(
                field.to_string(),
                messages.map(Value::from).unwrap_or(Value::Null),
            );
        }
        Self(map)
    }

    /// The body could not be decoded into the schema at all.
    pub fn body<T: Schema>(message: String) -> Self {
        let mut map: Map<String, Value> = T::FIELDS
            .iter()
            .map(|field| (field.to_string(), Value::Null))
            .collect();
        map.insert("body".into(), Value::from(vec![message]));
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed: Vec<&str> = self
            .0
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, _)| k.as_str())
            .collect();
        write!(f, "invalid fields: {}", failed.join(", "))
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn validate<T: Schema>(val: &T) -> Result<(), Error> {
    val.validate()
        .map_err(|errors| Error::Validation(FieldErrors::from_validation::<T>(&errors)))
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("role");
        error.message = Some("Role must be one of: user, admin".into());
        error
    })
}

/// JSON body extractor that runs the payload's schema before the handler sees it.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Schema,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::Validation(FieldErrors::body::<T>(rejection.body_text())))?;
        validate(&payload)?;
        Ok(Self(payload))
    }
}

/// A resource addressed by a numeric `:id` path segment.
pub trait Resource {
    const NOT_FOUND: &'static str;
}

/// `:id` path segment. An id that cannot name a row is answered like a
/// missing row, with the resource's 404 message.
#[derive(Debug)]
pub struct PathId<R> {
    pub id: u64,
    resource: PhantomData<fn() -> R>,
}

fn parse_id<R: Resource>(raw: &str) -> Result<PathId<R>, Error> {
    raw.parse::<u64>()
        .map(|id| PathId {
            id,
            resource: PhantomData,
        })
        .map_err(|_| Error::NotFound(R::NOT_FOUND.to_string()))
}

#[async_trait]
impl<R, S> FromRequestParts<S> for PathId<R>
where
    R: Resource + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        parse_id(&raw)
    }
}
