// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::ResultRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
    #[error("Failed to obtain vqd token for {0:?}")]
    Token(String),
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// 安全搜索级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeSearch {
    On,
    #[default]
    Moderate,
    Off,
}

/// 文本搜索后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBackend {
    /// `links.duckduckgo.com/d.js` JSON 接口
    #[default]
    Api,
    /// `html.duckduckgo.com` 无脚本页面
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParams {
    pub region: String,
    pub safesearch: SafeSearch,
    pub backend: TextBackend,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsParams {
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
}

/// 图片搜索参数
///
/// 过滤条件为 `None` 时不限制
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageParams {
    pub region: String,
    pub safesearch: SafeSearch,
    pub size: Option<String>,
    pub color: Option<String>,
    pub type_image: Option<String>,
    pub layout: Option<String>,
    pub license_image: Option<String>,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoParams {
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateParams {
    /// 源语言，`None` 表示自动检测
    pub from: Option<String>,
    pub to: String,
}

/// 搜索提供方
///
/// 每个方法对应提供方的一类查询，返回规范化后的结果记录
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn text(
        &self,
        query: &str,
        params: &TextParams,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    /// 即时答案
    async fn answers(&self, query: &str) -> Result<Vec<ResultRecord>, ProviderError>;

    async fn news(
        &self,
        query: &str,
        params: &NewsParams,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    async fn images(
        &self,
        query: &str,
        params: &ImageParams,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    async fn videos(
        &self,
        query: &str,
        params: &VideoParams,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    /// 搜索建议（自动补全）
    async fn suggestions(
        &self,
        query: &str,
        region: &str,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    async fn translate(
        &self,
        text: &str,
        params: &TranslateParams,
    ) -> Result<Vec<ResultRecord>, ProviderError>;

    /// Get the name of the search provider
    fn name(&self) -> &'static str;
}
