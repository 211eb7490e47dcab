// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::json;

/// 测试健康检查端点
#[tokio::test]
async fn test_health_check() {
    let app = create_test_app("s3cret").await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

/// 测试版本信息端点
#[tokio::test]
async fn test_version() {
    let app = create_test_app("s3cret").await;

    let response = app.server.get("/v1/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 测试密钥错误时的拒绝
///
/// 验证密钥不匹配的请求在任何管线I/O之前被403拒绝
#[tokio::test]
async fn test_wrong_secret_is_forbidden() {
    let app = create_test_app("s3cret").await;

    let response = app
        .server
        .post("/v1/solve")
        .json(&json!({
            "email": "a@b.com",
            "secret": "wrong",
            "url": "https://example.com/quiz"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], json!(false));
    // 管线从未启动
    assert_eq!(
        app.oracle_calls.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

/// 测试求解请求的参数验证
///
/// 验证API对缺失和无效参数的验证和错误响应格式
#[tokio::test]
async fn test_solve_request_validation() {
    let app = create_test_app("s3cret").await;

    // 测试缺少URL参数
    let response = app
        .server
        .post("/v1/solve")
        .json(&json!({
            "email": "a@b.com",
            "secret": "s3cret"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // 测试无效URL格式
    let response = app
        .server
        .post("/v1/solve")
        .json(&json!({
            "email": "a@b.com",
            "secret": "s3cret",
            "url": "not-a-valid-url"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // 测试无效邮箱
    let response = app
        .server
        .post("/v1/solve")
        .json(&json!({
            "email": "not-an-email",
            "secret": "s3cret",
            "url": "https://example.com/quiz"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// 测试渲染失败的错误分类
///
/// 密钥正确但目标URL不可渲染时，响应为502并标注失败阶段
#[tokio::test]
async fn test_render_failure_is_classified() {
    let app = create_test_app("s3cret").await;

    let response = app
        .server
        .post("/v1/solve")
        .json(&json!({
            "email": "a@b.com",
            "secret": "s3cret",
            "url": "http://127.0.0.1:9/quiz"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["stage"], json!("render"));
}
