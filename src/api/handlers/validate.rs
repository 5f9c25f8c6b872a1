//! Input checks shared by every resource handler.
//!
//! All of these run before the store is touched.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, Uri, header},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiError;
use crate::db::ObjectId;

/// Request body read leniently: a missing JSON content type, an empty body
/// or a top-level array all yield `T::default()`, so absent fields are
/// reported by [`required`] rather than by the parser.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody {
                message: rejection.body_text(),
            })?;

        parse_body(is_json, &bytes).map(JsonBody)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn parse_body<T: DeserializeOwned + Default>(is_json: bool, bytes: &[u8]) -> Result<T, ApiError> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody {
        message: format!("Failed to parse the request body as JSON: {}", e),
    })?;

    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(|e| ApiError::MalformedBody {
            message: format!("Failed to deserialize the JSON body into the target type: {}", e),
        }),
        Value::Array(_) => Ok(T::default()),
        _ => Err(ApiError::MalformedBody {
            message: "The request body must be a JSON object".to_string(),
        }),
    }
}

/// A required, non-empty string field.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField { field })
}

/// Parse `raw` as an id, naming `field` in the error.
pub fn parse_id(field: &str, raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse(raw).map_err(|_| ApiError::invalid_id(field))
}

/// `Location` of a created record: the request path plus its id.
pub fn location(uri: &Uri, id: ObjectId) -> String {
    format!("{}/{}", uri.path().trim_end_matches('/'), id)
}
