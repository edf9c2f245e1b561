// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ddgs_web::application::use_cases::search_use_case::SearchUseCase;
use ddgs_web::config::settings::Settings;
use ddgs_web::domain::search::provider::SearchProvider;
use ddgs_web::infrastructure::metrics::init_metrics;
use ddgs_web::infrastructure::search::DuckDuckGoClient;
use ddgs_web::infrastructure::session::session_store::SessionStore;
use ddgs_web::presentation::routes::{build_app, AppComponents};
use ddgs_web::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting ddgs-web...");

    // Initialize Prometheus Metrics
    let metrics = init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Search provider and result cache
    let provider: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoClient::new(&settings.provider)?);
    let search = Arc::new(SearchUseCase::from_settings(provider, &settings.cache));
    info!(
        capacity = settings.cache.capacity,
        ttl_secs = settings.cache.ttl_secs,
        "Search provider initialized"
    );

    // 4. Sessions, with idle ones purged in the background
    let sessions = Arc::new(SessionStore::new());
    let idle_timeout = Duration::from_secs(settings.session.idle_timeout_secs);
    let purge_sessions = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            purge_sessions.purge_idle(idle_timeout);
        }
    });

    // 5. Start HTTP server
    let app = build_app(AppComponents {
        search,
        sessions,
        settings: settings.clone(),
        metrics,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
