//! Request extractors: correlation id and content-type aware body binding.

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, HeaderName},
    response::{IntoResponse, Response},
    Form, Json,
};
use common::{ApiResult, AppError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Same cap as axum's default body limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Id assigned by the request-id middleware; empty when the layer is absent.
pub fn request_id_of(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestId(request_id_of(&parts.headers)))
    }
}

/// Body bound from JSON, XML or an urlencoded form, picked by `Content-Type`.
/// Anything that is neither XML nor a form is read as JSON. An empty body
/// binds as `T::default()` and is left to validation.
#[derive(Debug, Clone)]
pub struct Bind<T>(pub T);

#[derive(Debug)]
pub struct BindRejection {
    pub request_id: String,
    pub message: String,
}

impl IntoResponse for BindRejection {
    fn into_response(self) -> Response {
        warn!(request_id = %self.request_id, error = %self.message, "request body bind failed");
        let err = AppError::Bind(self.message.clone());
        ApiResult::failure(Value::String(self.message), &err, self.request_id).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Xml,
    Form,
}

fn body_format(headers: &HeaderMap) -> BodyFormat {
    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match mime.as_str() {
        "application/xml" | "text/xml" => BodyFormat::Xml,
        "application/x-www-form-urlencoded" => BodyFormat::Form,
        _ => BodyFormat::Json,
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Bind<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(req.headers());
        let (parts, body) = req.into_parts();
        let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(BindRejection { request_id, message: e.to_string() }),
        };
        if bytes.is_empty() {
            return Ok(Bind(T::default()));
        }
        let req = Request::from_parts(parts, Body::from(bytes));
        let bound = match body_format(req.headers()) {
            BodyFormat::Json => Json::<T>::from_request(req, state)
                .await
                .map(|Json(v)| v)
                .map_err(|e| e.body_text()),
            BodyFormat::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(v)| v)
                .map_err(|e| e.body_text()),
            BodyFormat::Xml => match String::from_request(req, state).await {
                Ok(body) => quick_xml::de::from_str::<T>(&body).map_err(|e| e.to_string()),
                Err(e) => Err(e.body_text()),
            },
        };
        bound
            .map(Bind)
            .map_err(|message| BindRejection { request_id, message })
    }
}
