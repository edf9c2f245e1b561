// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ProviderSettings;
use crate::domain::models::search_result::ResultRecord;
use crate::domain::search::provider::{
    ImageParams, NewsParams, ProviderError, SafeSearch, SearchProvider, TextBackend, TextParams,
    TranslateParams, VideoParams,
};
use crate::infrastructure::search::parsers;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// 单次查询最多翻页数
const MAX_PAGES: usize = 5;

type Params = Vec<(&'static str, String)>;

/// DuckDuckGo 搜索客户端
///
/// 文本搜索走 `links.duckduckgo.com/d.js`（或无脚本 HTML 页），新闻、图片、视频走
/// 主站的 JSON 接口，这些接口都需要先从首页取得 vqd 令牌。不做重试。
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    base_url: String,
    html_url: String,
    links_url: String,
    api_url: String,
}

impl DuckDuckGoClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .cookie_store(true)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: trim_base(&settings.base_url),
            html_url: trim_base(&settings.html_url),
            links_url: trim_base(&settings.links_url),
            api_url: trim_base(&settings.api_url),
        })
    }

    /// 发送请求并把限流和非 2xx 状态映射为错误
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<String, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::ACCEPTED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        ) {
            warn!(endpoint, status = status.as_u16(), "DuckDuckGo rate limited the request");
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))
    }

    async fn get_json(&self, url: String, params: &Params) -> Result<Value, ProviderError> {
        let body = self.send(self.client.get(&url).query(params), &url).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(format!("{url}: {e}")))
    }

    async fn vqd(&self, query: &str) -> Result<String, ProviderError> {
        let url = format!("{}/", self.base_url);
        let body = self
            .send(self.client.get(&url).query(&[("q", query)]), &url)
            .await?;
        parsers::extract_vqd(&body, query)
    }

    /// 翻页读取 `news.js`/`i.js`/`v.js`，按 `dedup_field` 去重，达到上限即停止
    async fn paged_json<F>(
        &self,
        endpoint: &str,
        mut params: Params,
        max_results: usize,
        dedup_field: &str,
        map_row: F,
    ) -> Result<Vec<ResultRecord>, ProviderError>
    where
        F: Fn(&Map<String, Value>) -> Option<ResultRecord>,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for page in 0..MAX_PAGES {
            let body = self.send(self.client.get(&url).query(&params), &url).await?;
            let json_page = parsers::parse_json_page(&body)?;
            debug!(endpoint, page, rows = json_page.rows.len(), "DuckDuckGo page received");

            for row in &json_page.rows {
                let Some(record) = map_row(row) else {
                    continue;
                };
                let Some(key) = parsers::dedup_key(&record, dedup_field) else {
                    continue;
                };
                if seen.insert(key) {
                    results.push(record);
                }
                if results.len() >= max_results {
                    return Ok(results);
                }
            }

            match json_page.next_offset {
                Some(offset) if !json_page.rows.is_empty() => set_param(&mut params, "s", offset),
                _ => break,
            }
        }

        Ok(results)
    }

    async fn text_api(
        &self,
        query: &str,
        params: &TextParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let vqd = self.vqd(query).await?;
        let (p, ex) = match params.safesearch {
            SafeSearch::On => ("1", ""),
            SafeSearch::Moderate => ("", "-1"),
            SafeSearch::Off => ("", "-2"),
        };
        let query_params: Params = vec![
            ("q", query.to_string()),
            ("kl", params.region.clone()),
            ("l", params.region.clone()),
            ("p", p.to_string()),
            ("s", "0".to_string()),
            ("df", String::new()),
            ("vqd", vqd),
            ("ex", ex.to_string()),
        ];

        let url = format!("{}/d.js", self.links_url);
        let body = self
            .send(self.client.get(&url).query(&query_params), &url)
            .await?;
        parsers::parse_text_api(&body, query, params.max_results)
    }

    async fn text_html(
        &self,
        query: &str,
        params: &TextParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let form: Params = vec![
            ("q", query.to_string()),
            ("kl", params.region.clone()),
            ("kp", safesearch_code(params.safesearch).to_string()),
        ];

        let url = format!("{}/html/", self.html_url);
        let body = self.send(self.client.post(&url).form(&form), &url).await?;
        parsers::parse_text_html(&body, params.max_results)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn text(
        &self,
        query: &str,
        params: &TextParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        match params.backend {
            TextBackend::Api => self.text_api(query, params).await,
            TextBackend::Html => self.text_html(query, params).await,
        }
    }

    async fn answers(&self, query: &str) -> Result<Vec<ResultRecord>, ProviderError> {
        let params: Params = vec![("q", query.to_string()), ("format", "json".to_string())];
        let json = self.get_json(format!("{}/", self.api_url), &params).await?;
        Ok(parsers::parse_answers(&json))
    }

    async fn news(
        &self,
        query: &str,
        params: &NewsParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let vqd = self.vqd(query).await?;
        let query_params: Params = vec![
            ("l", params.region.clone()),
            ("o", "json".to_string()),
            ("noamp", "1".to_string()),
            ("q", query.to_string()),
            ("vqd", vqd),
            ("p", safesearch_code(params.safesearch).to_string()),
            ("df", String::new()),
        ];

        self.paged_json(
            "news.js",
            query_params,
            params.max_results,
            "url",
            parsers::news_record,
        )
        .await
    }

    async fn images(
        &self,
        query: &str,
        params: &ImageParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let vqd = self.vqd(query).await?;
        let filters = format!(
            ",{},{},{},{},{}",
            image_filter("size", params.size.as_deref()),
            image_filter("color", params.color.as_deref()),
            image_filter("type", params.type_image.as_deref()),
            image_filter("layout", params.layout.as_deref()),
            image_filter("license", params.license_image.as_deref()),
        );
        let safe = match params.safesearch {
            SafeSearch::Off => "-1",
            SafeSearch::On | SafeSearch::Moderate => "1",
        };
        let query_params: Params = vec![
            ("l", params.region.clone()),
            ("o", "json".to_string()),
            ("q", query.to_string()),
            ("vqd", vqd),
            ("f", filters),
            ("p", safe.to_string()),
        ];

        self.paged_json(
            "i.js",
            query_params,
            params.max_results,
            "image",
            parsers::image_record,
        )
        .await
    }

    async fn videos(
        &self,
        query: &str,
        params: &VideoParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let vqd = self.vqd(query).await?;
        let query_params: Params = vec![
            ("l", params.region.clone()),
            ("o", "json".to_string()),
            ("q", query.to_string()),
            ("vqd", vqd),
            ("f", ",,,".to_string()),
            ("p", safesearch_code(params.safesearch).to_string()),
        ];

        self.paged_json(
            "v.js",
            query_params,
            params.max_results,
            "content",
            parsers::video_record,
        )
        .await
    }

    async fn suggestions(
        &self,
        query: &str,
        region: &str,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let params: Params = vec![("q", query.to_string()), ("kl", region.to_string())];
        let json = self.get_json(format!("{}/ac/", self.base_url), &params).await?;
        Ok(parsers::parse_suggestions(&json))
    }

    async fn translate(
        &self,
        text: &str,
        params: &TranslateParams,
    ) -> Result<Vec<ResultRecord>, ProviderError> {
        let vqd = self.vqd("translate").await?;
        let mut query_params: Params = vec![
            ("vqd", vqd),
            ("query", "translate".to_string()),
            ("to", params.to.clone()),
        ];
        if let Some(from) = &params.from {
            query_params.push(("from", from.clone()));
        }

        let url = format!("{}/translation.js", self.base_url);
        let body = self
            .send(
                self.client
                    .post(&url)
                    .query(&query_params)
                    .body(text.to_string()),
                &url,
            )
            .await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("{url}: {e}")))?;

        Ok(vec![parsers::parse_translation(&json, text)?])
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// 新闻、视频与 HTML 文本搜索共用的安全搜索编码
fn safesearch_code(safesearch: SafeSearch) -> &'static str {
    match safesearch {
        SafeSearch::On => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

fn image_filter(name: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!("{name}:{v}"))
        .unwrap_or_default()
}

fn set_param(params: &mut Params, key: &'static str, value: String) {
    match params.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => params.push((key, value)),
    }
}
