//! `/account` routes.

pub mod dto;

use axum::{routing::post, Router};
use common::{ApiResult, AppError, Validate};
use serde_json::Value;
use tracing::{info, warn};

use crate::extract::{Bind, RequestId};
use crate::state::AppState;
use dto::{RegisterAccountRequest, RegisteredAccount};

pub fn routes() -> Router<AppState> {
    Router::new().route("/registerAccount", post(register_account))
}

/// 注册账号：绑定 -> 校验 -> 返回统一响应。
/// 持久化与验证码校验尚未接入，校验通过即返回账号概要。
pub async fn register_account(
    RequestId(request_id): RequestId,
    Bind(req): Bind<RegisterAccountRequest>,
) -> ApiResult<Value> {
    let violations = req.validate();
    if !violations.is_empty() {
        warn!(%request_id, violations = violations.len(), "register account validation failed");
        let data = serde_json::to_value(&violations).unwrap_or(Value::Null);
        return ApiResult::failure(data, &AppError::Validation(violations), request_id);
    }

    let account = RegisteredAccount::from(&req);
    info!(%request_id, email = %account.email, "register account accepted");
    match serde_json::to_value(&account) {
        Ok(data) => ApiResult::success(data, request_id),
        Err(e) => ApiResult::failure(Value::Null, &AppError::from(anyhow::Error::from(e)), request_id),
    }
}
