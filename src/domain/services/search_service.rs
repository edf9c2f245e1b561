// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::{Category, CategoryError};
use crate::domain::models::search_result::ResultRecord;
use crate::domain::search::provider::{
    ImageParams, NewsParams, ProviderError, SafeSearch, SearchProvider, TextBackend, TextParams,
    TranslateParams, VideoParams,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// 全球区域（不按地区调整结果）
pub const DEFAULT_REGION: &str = "wt-wt";
pub const TEXT_MAX_RESULTS: usize = 10;
pub const NEWS_MAX_RESULTS: usize = 10;
pub const IMAGES_MAX_RESULTS: usize = 12;
pub const VIDEOS_MAX_RESULTS: usize = 10;
pub const TRANSLATE_TARGET_LANGUAGE: &str = "en";

#[derive(Error, Debug)]
pub enum SearchServiceError {
    #[error(transparent)]
    UnknownCategory(#[from] CategoryError),
    #[error("Search provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub fn text_params() -> TextParams {
    TextParams {
        region: DEFAULT_REGION.to_string(),
        safesearch: SafeSearch::On,
        backend: TextBackend::Api,
        max_results: TEXT_MAX_RESULTS,
    }
}

pub fn news_params() -> NewsParams {
    NewsParams {
        region: DEFAULT_REGION.to_string(),
        safesearch: SafeSearch::On,
        max_results: NEWS_MAX_RESULTS,
    }
}

pub fn image_params() -> ImageParams {
    ImageParams {
        region: DEFAULT_REGION.to_string(),
        safesearch: SafeSearch::On,
        size: None,
        color: None,
        type_image: None,
        layout: None,
        license_image: None,
        max_results: IMAGES_MAX_RESULTS,
    }
}

pub fn video_params() -> VideoParams {
    VideoParams {
        region: DEFAULT_REGION.to_string(),
        safesearch: SafeSearch::On,
        max_results: VIDEOS_MAX_RESULTS,
    }
}

pub fn translate_params() -> TranslateParams {
    TranslateParams {
        from: None,
        to: TRANSLATE_TARGET_LANGUAGE.to_string(),
    }
}

/// 查询分发服务
///
/// 每个已知类别恰好对应一次提供方调用，参数固定；
/// 不做重试、分页或去重，提供方错误原样向上传播
pub struct SearchService<P: ?Sized> {
    provider: Arc<P>,
}

impl<P> SearchService<P>
where
    P: SearchProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// 按类别标签执行搜索
    ///
    /// # Errors
    ///
    /// * `UnknownCategory` - 标签不是已知类别，此时不会调用提供方
    /// * `Provider` - 提供方调用失败
    pub async fn search(
        &self,
        tag: &str,
        query: &str,
    ) -> Result<Vec<ResultRecord>, SearchServiceError> {
        let category: Category = tag.parse()?;
        self.dispatch(category, query).await
    }

    pub async fn dispatch(
        &self,
        category: Category,
        query: &str,
    ) -> Result<Vec<ResultRecord>, SearchServiceError> {
        info!(
            provider = self.provider.name(),
            category = %category,
            query,
            "Searching for {}",
            category
        );
        metrics::counter!("search_requests_total", "category" => category.as_str()).increment(1);

        let results = match category {
            Category::Text => self.provider.text(query, &text_params()).await?,
            Category::Answers => self.provider.answers(query).await?,
            Category::News => self.provider.news(query, &news_params()).await?,
            Category::Images => self.provider.images(query, &image_params()).await?,
            Category::Videos => self.provider.videos(query, &video_params()).await?,
            Category::Suggestions => self.provider.suggestions(query, DEFAULT_REGION).await?,
            Category::Translate => self.provider.translate(query, &translate_params()).await?,
            Category::Maps => {
                warn!(query, "Maps search is not supported by this front-end");
                Vec::new()
            }
        };

        info!(category = %category, count = results.len(), "Search completed");
        Ok(results)
    }
}
