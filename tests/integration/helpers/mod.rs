// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use ddgs_web::application::use_cases::search_use_case::SearchUseCase;
use ddgs_web::config::settings::{CacheSettings, Settings};
use ddgs_web::domain::models::search_result::ResultRecord;
use ddgs_web::domain::search::provider::{
    ImageParams, NewsParams, ProviderError, SearchProvider, TextParams, TranslateParams,
    VideoParams,
};
use ddgs_web::infrastructure::metrics::MetricsHandle;
use ddgs_web::infrastructure::session::session_store::SessionStore;
use ddgs_web::presentation::routes::{build_app, AppComponents};
use parking_lot::Mutex;
use std::sync::Arc;

/// 可编排结果的提供方替身，记录每次调用的方法名和查询
#[derive(Default)]
pub struct ScriptedProvider {
    calls: Mutex<Vec<(String, String)>>,
    results: Vec<ResultRecord>,
    failure: Option<ProviderError>,
}

impl ScriptedProvider {
    pub fn returning(results: Vec<ResultRecord>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    fn respond(&self, method: &str, query: &str) -> Result<Vec<ResultRecord>, ProviderError> {
        self.calls.lock().push((method.to_string(), query.to_string()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.results.clone()),
        }
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn text(&self, query: &str, _: &TextParams) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("text", query)
    }

    async fn answers(&self, query: &str) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("answers", query)
    }

    async fn news(&self, query: &str, _: &NewsParams) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("news", query)
    }

    async fn images(
        &self,
        query: &str,
        _: &ImageParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("images", query)
    }

    async fn videos(
        &self,
        query: &str,
        _: &VideoParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("videos", query)
    }

    async fn suggestions(
        &self,
        query: &str,
        _: &str,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("suggestions", query)
    }

    async fn translate(
        &self,
        text: &str,
        _: &TranslateParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        self.respond("translate", text)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// 测试应用及其共享组件
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<ScriptedProvider>,
    pub sessions: Arc<SessionStore>,
}

pub fn test_app(provider: ScriptedProvider) -> TestApp {
    let provider = Arc::new(provider);
    let settings = Arc::new(Settings::default());
    let search = Arc::new(SearchUseCase::from_settings(
        provider.clone(),
        &CacheSettings::default(),
    ));
    let sessions = Arc::new(SessionStore::new());

    let router = build_app(AppComponents {
        search,
        sessions: sessions.clone(),
        settings,
        metrics: MetricsHandle::disabled(),
    });

    TestApp {
        router,
        provider,
        sessions,
    }
}

pub fn form_request(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn page_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 取出 `Set-Cookie` 中的 `name=value` 部分
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
