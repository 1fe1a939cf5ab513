use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;

const REGISTER: &str = "/api/v1/account/registerAccount";

fn app() -> Router {
    // 账号接口不访问数据库，用未连接的句柄即可
    routes::build_router(AppState::new(DatabaseConnection::Disconnected), CorsLayer::very_permissive())
}

async fn send(req: Request<Body>) -> anyhow::Result<(StatusCode, Option<String>, Value)> {
    let resp = app().oneshot(req).await?;
    let status = resp.status();
    let header_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, header_id, serde_json::from_slice(&bytes)?))
}

fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(REGISTER)
        .header("content-type", content_type)
        .body(body.into())
        .expect("request")
}

fn valid_body() -> Value {
    json!({
        "email": "fank@example.com",
        "phone": "13800000000",
        "nickname": "fank",
        "password": "s3cret!pw",
        "email_verification_code": "482913",
        "img_verification_code": "x7kq"
    })
}

fn violation_fields(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("violation list")
        .iter()
        .map(|v| v["field"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn missing_fields_yield_400_with_violations() -> anyhow::Result<()> {
    let (status, header_id, body) =
        send(post("application/json", json!({"nickname": "ab"}).to_string())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20000);
    assert_eq!(body["msg"], "错误请求");
    assert_eq!(
        violation_fields(&body),
        vec!["email", "password", "email_verification_code", "img_verification_code"]
    );
    for v in body["data"].as_array().unwrap() {
        assert_eq!(v["tag"], "required");
        assert_eq!(v["error"], true);
    }
    let request_id = body["requestId"].as_str().unwrap();
    assert!(!request_id.is_empty());
    assert_eq!(header_id.as_deref(), Some(request_id));
    Ok(())
}

#[tokio::test]
async fn null_fields_are_treated_as_missing() -> anyhow::Result<()> {
    let (status, _, body) = send(post(
        "application/json",
        json!({"nickname": "ab", "phone": null, "email": null}).to_string(),
    ))
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20000);
    assert_eq!(
        violation_fields(&body),
        vec!["email", "password", "email_verification_code", "img_verification_code"]
    );
    Ok(())
}

#[tokio::test]
async fn null_phone_with_valid_fields_succeeds() -> anyhow::Result<()> {
    let mut payload = valid_body();
    payload["phone"] = Value::Null;
    let (status, _, body) = send(post("application/json", payload.to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn empty_body_reports_every_required_field() -> anyhow::Result<()> {
    let (status, _, body) = send(post("application/json", Body::empty())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20000);
    assert_eq!(
        violation_fields(&body),
        vec!["email", "nickname", "password", "email_verification_code", "img_verification_code"]
    );
    Ok(())
}

#[tokio::test]
async fn valid_json_registration_succeeds() -> anyhow::Result<()> {
    let (status, _, body) = send(post("application/json", valid_body().to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    let obj = body.as_object().unwrap();
    for key in ["code", "msg", "data", "requestId", "timeStamp"] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(body["code"], Value::Null);
    assert_eq!(body["msg"], Value::Null);
    assert_eq!(body["data"]["email"], "fank@example.com");
    assert_eq!(body["data"]["nickname"], "fank");
    assert_eq!(body["data"]["phone"], "13800000000");
    assert!(body["data"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn short_password_reports_min_without_echo() -> anyhow::Result<()> {
    let mut payload = valid_body();
    payload["password"] = json!("abc");
    let (status, _, body) = send(post("application/json", payload.to_string())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["field"], "password");
    assert_eq!(data[0]["tag"], "min");
    assert_eq!(data[0]["param"], "6");
    assert_eq!(data[0]["value"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bind_error() -> anyhow::Result<()> {
    let (status, _, body) = send(post("application/json", "{\"email\":")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20000);
    assert!(body["data"].as_str().is_some_and(|s| !s.is_empty()));
    Ok(())
}

#[tokio::test]
async fn wrong_field_type_is_bind_error() -> anyhow::Result<()> {
    let (status, _, body) = send(post("application/json", json!({"email": 42}).to_string())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20000);
    assert!(body["data"].is_string());
    Ok(())
}

#[tokio::test]
async fn form_body_binds() -> anyhow::Result<()> {
    let form = "email=fank%40example.com&nickname=fank&password=s3cret%21pw\
                &email_verification_code=482913&img_verification_code=x7kq";
    let (status, _, body) = send(post("application/x-www-form-urlencoded", form)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "fank@example.com");
    assert_eq!(body["data"]["phone"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn xml_body_binds() -> anyhow::Result<()> {
    let xml = "<RegisterAccountRequest>\
               <email>fank@example.com</email>\
               <nickname>fank</nickname>\
               <password>s3cret!pw</password>\
               <email_verification_code>482913</email_verification_code>\
               <img_verification_code>x7kq</img_verification_code>\
               </RegisterAccountRequest>";
    let (status, _, body) = send(post("application/xml", xml)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nickname"], "fank");
    Ok(())
}

#[tokio::test]
async fn xml_missing_fields_are_violations() -> anyhow::Result<()> {
    let xml = "<RegisterAccountRequest><nickname>ab</nickname></RegisterAccountRequest>";
    let (status, _, body) = send(post("text/xml", xml)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(violation_fields(&body).len(), 4);
    Ok(())
}

#[tokio::test]
async fn incoming_request_id_is_echoed() -> anyhow::Result<()> {
    let req = Request::builder()
        .method("POST")
        .uri(REGISTER)
        .header("content-type", "application/json")
        .header("x-request-id", "trace-me-42")
        .body(Body::from(valid_body().to_string()))?;
    let (_, header_id, body) = send(req).await?;
    assert_eq!(body["requestId"], "trace-me-42");
    assert_eq!(header_id.as_deref(), Some("trace-me-42"));
    Ok(())
}

#[tokio::test]
async fn health_without_database_is_server_error() -> anyhow::Result<()> {
    let req = Request::builder().uri("/health").body(Body::empty())?;
    let (status, _, body) = send(req).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 10000);
    assert_eq!(body["msg"], "服务端异常");
    assert_eq!(body["data"], Value::Null);
    Ok(())
}
