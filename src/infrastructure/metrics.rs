// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Prometheus 渲染句柄；未安装记录器时为空
#[derive(Clone, Default)]
pub struct MetricsHandle(Option<PrometheusHandle>);

impl MetricsHandle {
    pub fn disabled() -> Self {
        Self(None)
    }

    /// 以 Prometheus 文本格式导出当前指标
    pub fn render(&self) -> Option<String> {
        self.0.as_ref().map(PrometheusHandle::render)
    }
}

/// 初始化指标系统
///
/// 安装全局 Prometheus 记录器并注册搜索相关指标；
/// 记录器已存在时（例如测试中重复初始化）返回空句柄
pub fn init_metrics() -> MetricsHandle {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            return MetricsHandle::disabled();
        }
    };

    describe_counter!(
        "search_requests_total",
        "Total number of provider searches dispatched, by category"
    );
    describe_counter!(
        "search_failures_total",
        "Total number of failed searches, by category"
    );
    describe_counter!(
        "search_cache_hits_total",
        "Total number of searches served from the result cache, by category"
    );

    info!("Prometheus metrics recorder installed");
    MetricsHandle(Some(handle))
}
