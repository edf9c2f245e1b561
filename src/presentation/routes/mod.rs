// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::search_use_case::SearchUseCase;
use crate::config::settings::Settings;
use crate::infrastructure::metrics::MetricsHandle;
use crate::infrastructure::session::session_store::SessionStore;
use crate::presentation::handlers::{metrics_handler, search_api_handler, search_page_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 应用运行所需的共享组件
#[derive(Clone)]
pub struct AppComponents {
    pub search: Arc<SearchUseCase>,
    pub sessions: Arc<SessionStore>,
    pub settings: Arc<Settings>,
    pub metrics: MetricsHandle,
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回未注入依赖的路由，处理器通过 `Extension` 读取共享组件
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/metrics", get(metrics_handler::metrics));

    let ui_routes = Router::new()
        .route("/", get(search_page_handler::index))
        .route("/search", post(search_page_handler::submit));

    let api_routes = Router::new().route("/v1/search", post(search_api_handler::search));

    Router::new()
        .merge(public_routes)
        .merge(ui_routes)
        .merge(api_routes)
}

/// 组装完整应用：路由、共享组件和请求追踪
pub fn build_app(components: AppComponents) -> Router {
    routes()
        .layer(Extension(components.search))
        .layer(Extension(components.sessions))
        .layer(Extension(components.settings))
        .layer(Extension(components.metrics))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
