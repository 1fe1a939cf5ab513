pub mod account;

use axum::{
    extract::{Request, State},
    routing::get,
    Router,
};
use common::{types::Health, ApiResult, AppError};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::extract::{request_id_of, RequestId};
use crate::state::AppState;

/// Liveness plus a database round trip.
pub async fn health(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> ApiResult<Option<Health>> {
    match state.db.ping().await {
        Ok(()) => ApiResult::success(Some(Health::ok()), request_id),
        Err(e) => ApiResult::failure(None, &AppError::from(anyhow::Error::from(e)), request_id),
    }
}

fn api_v1() -> Router<AppState> {
    Router::new().nest("/account", account::routes())
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                // 每个请求一个 span，带上 request id 便于串联日志
                .make_span_with(|req: &Request| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id_of(req.headers()),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(cors)
        // 响应头回写 x-request-id
        .layer(PropagateRequestIdLayer::x_request_id())
        // 最外层：沿用客户端传入的 x-request-id，否则生成 UUID
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
