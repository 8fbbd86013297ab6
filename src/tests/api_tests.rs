use crate::api::handlers::app_router;
use crate::core::optimizer::OptimizerConfig;
use crate::tests::{create_service_with, create_test_service};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> Router {
    app_router(Arc::new(create_test_service()), Duration::from_secs(5))
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_smart_settlement_returns_plan() {
    let body = json!({
        "balances": { "1": 20, "2": 0, "3": -20 },
        "members": [
            { "id": 1, "display_name": "Alice" },
            { "id": 2, "username": "bob" },
            { "id": 3, "name": "Charlie" }
        ]
    });
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = read_json(response).await;
    assert_eq!(
        plan["settlements"],
        json!([{ "from": 3, "to": 1, "fromName": "Charlie", "toName": "Alice", "amount": 20.0 }])
    );
    assert_eq!(plan["optimization_info"]["algorithm"], json!("Greedy Heap"));
    assert_eq!(plan["optimization_info"]["efficiency_percentage"], json!(50.0));
    assert_eq!(plan["optimization_info"]["transactions_reduced"], json!(1));
}

#[tokio::test]
async fn test_empty_body_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], json!("Request body is required"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", "{\"balances\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_missing_balances_yield_empty_plan() {
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = read_json(response).await;
    assert_eq!(plan["settlements"], json!([]));
    assert_eq!(plan["optimization_info"]["algorithm"], json!("No balances"));
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/smart-settlement")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/smart-settlement")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_strict_mode_rejects_unbalanced_input() {
    let service = create_service_with(OptimizerConfig {
        strict_balance_check: true,
    });
    let app = app_router(Arc::new(service), Duration::from_secs(5));
    let body = json!({ "balances": { "1": 20, "2": -10 } });

    let response = app
        .oneshot(post_json("/api/smart-settlement", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json(response).await["error"], json!("Unbalanced input"));
}

#[tokio::test]
async fn test_logs_endpoint_lists_runs() {
    let app = test_app();
    let body = json!({ "balances": { "1": 5, "2": -5 } });
    let response = app
        .clone()
        .oneshot(post_json("/api/smart-settlement", body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder().uri("/api/logs").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let logs = read_json(response).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);
    assert_eq!(logs[0]["action"], json!("SETTLEMENT_OPTIMIZED"));
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_unreadable_roster_records_are_skipped() {
    let body = json!({
        "balances": { "1": 20, "2": -20 },
        "members": [{ "id": 1, "username": 42 }, null, { "id": 2, "name": "Bob" }]
    });
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = read_json(response).await;
    assert_eq!(
        plan["settlements"],
        json!([{ "from": 2, "to": 1, "fromName": "Bob", "toName": "User_1", "amount": 20.0 }])
    );
}

#[tokio::test]
async fn test_null_body_is_an_empty_request() {
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", "null"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = read_json(response).await;
    assert_eq!(plan["optimization_info"]["algorithm"], json!("No balances"));
}

#[tokio::test]
async fn test_oversized_balances_are_dropped() {
    let body = r#"{ "balances": { "1": 1e307, "2": -1e307 } }"#;
    let response = test_app()
        .oneshot(post_json("/api/smart-settlement", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = read_json(response).await;
    assert_eq!(plan["settlements"], json!([]));
    assert_eq!(plan["optimization_info"]["algorithm"], json!("No balances"));
}
