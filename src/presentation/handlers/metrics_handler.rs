// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::metrics::MetricsHandle;
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// 导出 Prometheus 指标；记录器未安装时返回 404
pub async fn metrics(Extension(handle): Extension<MetricsHandle>) -> Response {
    match handle.render() {
        Some(body) => ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response(),
        None => {
            debug!("Metrics requested but no recorder is installed");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
