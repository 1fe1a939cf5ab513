//! Uniform response envelope shared by every endpoint.
//!
//! All five keys are always serialized; on success `code` and `msg` are
//! `null`. A failure may still carry data (e.g. the violation list).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_code::ErrorCode;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T = Value> {
    pub code: Option<i32>,
    pub msg: Option<String>,
    pub data: T,
    pub request_id: String,
    pub time_stamp: i64,
}

impl<T> ApiResult<T> {
    pub fn success(data: T, request_id: impl Into<String>) -> Self {
        Self {
            code: None,
            msg: None,
            data,
            request_id: request_id.into(),
            time_stamp: Utc::now().timestamp(),
        }
    }

    pub fn failure(data: T, err: &AppError, request_id: impl Into<String>) -> Self {
        let biz = err.biz_error();
        Self {
            code: Some(biz.code),
            msg: Some(biz.msg),
            data,
            request_id: request_id.into(),
            time_stamp: Utc::now().timestamp(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_none()
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            None => StatusCode::OK,
            Some(code) => ErrorCode::from_code(code)
                .map(ErrorCode::status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
