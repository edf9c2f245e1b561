// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{body_text, test_app, ScriptedProvider};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ddgs_web::presentation::routes;
use tower::util::ServiceExt;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let app = routes::routes();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn version_reports_package_version() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/v1/version")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, env!("CARGO_PKG_VERSION"));
}

/// 未安装指标记录器时 `/metrics` 返回 404
#[tokio::test]
async fn metrics_without_recorder_is_not_found() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
